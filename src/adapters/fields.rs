//! Lenient field readers shared by the adapters.

use crate::error::AdapterError;
use once_cell::sync::Lazy;
use serde_json::{Map, Value};

static EMPTY: Lazy<Map<String, Value>> = Lazy::new(Map::new);

/// Treat `value` as an object; anything else is a shape error.
pub fn expect_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, AdapterError> {
    value
        .as_object()
        .ok_or_else(|| AdapterError::unexpected(path, "object", value))
}

/// Entry `index` of the collection at `collection` as an object. The path in
/// the error is only built when the entry is not an object.
pub fn entry_object<'a>(
    value: &'a Value,
    collection: &str,
    index: usize,
) -> Result<&'a Map<String, Value>, AdapterError> {
    value
        .as_object()
        .ok_or_else(|| AdapterError::unexpected(format!("{collection}[{index}]"), "object", value))
}

/// Treat `value` as an array; anything else is a shape error.
pub fn expect_array<'a>(value: &'a Value, path: &str) -> Result<&'a [Value], AdapterError> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| AdapterError::unexpected(path, "array", value))
}

/// The required array under `key`.
pub fn array_field<'a>(obj: &'a Map<String, Value>, key: &str) -> Result<&'a [Value], AdapterError> {
    let value = obj.get(key).ok_or_else(|| AdapterError::MissingKey(key.to_string()))?;
    expect_array(value, key)
}

/// The nested object under `key`, or an empty map when missing or not an object.
pub fn object_field<'a>(obj: &'a Map<String, Value>, key: &str) -> &'a Map<String, Value> {
    obj.get(key)
        .and_then(Value::as_object)
        .unwrap_or_else(|| &*EMPTY)
}

/// A present, non-null value under `key`.
pub fn present<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

/// A non-empty string under `key`.
pub fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Identifier text: strings verbatim, numbers rendered, anything else empty.
pub fn text_or_empty(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// A coordinate from a JSON number or a numeric string.
///
/// Empty strings, unparseable strings, and non-numeric types are `None`.
/// `"0"` is `Some(0.0)`: only genuine absence maps to `None`.
pub fn coordinate(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                s.parse::<f64>().ok().filter(|v| v.is_finite())
            }
        }
        _ => None,
    }
}

/// A verbatim copy of `key`, or `null` when absent.
pub fn verbatim(obj: &Map<String, Value>, key: &str) -> Value {
    obj.get(key).cloned().unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coordinate_distinguishes_zero_from_absent() {
        assert_eq!(coordinate(Some(&json!("0"))), Some(0.0));
        assert_eq!(coordinate(Some(&json!(0))), Some(0.0));
        assert_eq!(coordinate(Some(&json!(""))), None);
        assert_eq!(coordinate(Some(&json!("  "))), None);
        assert_eq!(coordinate(None), None);
        assert_eq!(coordinate(Some(&Value::Null)), None);
    }

    #[test]
    fn test_coordinate_parses_strings_and_numbers() {
        assert_eq!(coordinate(Some(&json!("34.05"))), Some(34.05));
        assert_eq!(coordinate(Some(&json!(-118.25))), Some(-118.25));
        assert_eq!(coordinate(Some(&json!("north"))), None);
        assert_eq!(coordinate(Some(&json!("NaN"))), None);
        assert_eq!(coordinate(Some(&json!(true))), None);
    }

    #[test]
    fn test_text_or_empty() {
        assert_eq!(text_or_empty(Some(&json!("C-12"))), "C-12");
        assert_eq!(text_or_empty(Some(&json!(1204))), "1204");
        assert_eq!(text_or_empty(Some(&Value::Null)), "");
        assert_eq!(text_or_empty(None), "");
    }

    #[test]
    fn test_entry_object_reports_indexed_path() {
        assert!(entry_object(&json!({"id": "1"}), "$.data", 0).is_ok());
        assert_eq!(
            entry_object(&json!(42), "$.data", 3).unwrap_err(),
            AdapterError::UnexpectedShape {
                path: "$.data[3]".to_string(),
                expected: "object",
                found: "number",
            }
        );
    }

    #[test]
    fn test_array_field_missing_vs_wrong_type() {
        let obj = json!({"a": [1, 2], "b": "x", "c": null});
        let obj = obj.as_object().unwrap();
        assert_eq!(array_field(obj, "a").unwrap().len(), 2);
        assert_eq!(
            array_field(obj, "missing").unwrap_err(),
            AdapterError::MissingKey("missing".to_string())
        );
        assert!(array_field(obj, "c").is_err());
        assert!(array_field(obj, "b").is_err());
    }

    #[test]
    fn test_string_field_skips_empty() {
        let obj = json!({"a": "x", "b": "", "c": 3});
        let obj = obj.as_object().unwrap();
        assert_eq!(string_field(obj, "a").as_deref(), Some("x"));
        assert_eq!(string_field(obj, "b"), None);
        assert_eq!(string_field(obj, "c"), None);
    }
}
