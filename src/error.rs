//! Error types for the aggregator.
//!
//! Two families live here:
//! - [`AppError`]: fatal conditions that stop the run before any source is
//!   fetched (bad configuration, unwritable output, client construction).
//! - [`SourceFailure`] and the errors it wraps: everything that can go wrong
//!   for a single source. These never escape the source processor.

use thiserror::Error;

/// Fatal application error.
#[derive(Debug, Error)]
pub enum AppError {
    /// The source roster or settings are invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Report serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// The upstream could not provide data.
///
/// Transport errors, timeouts and non-2xx statuses all collapse into this one
/// value. `reason` exists for debug logging only.
#[derive(Debug, Clone, Error)]
#[error("could not obtain data from {url}")]
pub struct FetchFailure {
    pub url: String,
    pub reason: String,
}

impl FetchFailure {
    pub fn new(url: impl Into<String>, reason: impl ToString) -> Self {
        Self {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}

/// A payload did not have the structure an adapter requires.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdapterError {
    #[error("missing required key `{0}`")]
    MissingKey(String),

    #[error("expected {expected} at {path}, found {found}")]
    UnexpectedShape {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl AdapterError {
    pub fn unexpected(path: impl Into<String>, expected: &'static str, value: &serde_json::Value) -> Self {
        Self::UnexpectedShape {
            path: path.into(),
            expected,
            found: json_kind(value),
        }
    }
}

/// Why a single source produced no result. Exactly one is reported per source.
#[derive(Debug, Error)]
pub enum SourceFailure {
    #[error("fetch error")]
    Fetch(#[source] FetchFailure),

    #[error("parse/processing error: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("parse/processing error: {0}")]
    Adapter(#[source] AdapterError),

    #[error("no cameras found")]
    Empty,
}

/// Name of a JSON value's type, for error messages.
pub fn json_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_source_failure_reasons() {
        let fetch = SourceFailure::Fetch(FetchFailure::new("https://example.com", "timed out"));
        assert_eq!(fetch.to_string(), "fetch error");
        assert_eq!(SourceFailure::Empty.to_string(), "no cameras found");

        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        assert!(SourceFailure::Parse(parse_err)
            .to_string()
            .starts_with("parse/processing error: "));
    }

    #[test]
    fn test_adapter_error_message() {
        let err = AdapterError::unexpected("$", "array", &json!({"a": 1}));
        assert_eq!(err.to_string(), "expected array at $, found object");
        let wrapped = SourceFailure::Adapter(err);
        assert_eq!(
            wrapped.to_string(),
            "parse/processing error: expected array at $, found object"
        );
        assert_eq!(
            AdapterError::MissingKey("item2".to_string()).to_string(),
            "missing required key `item2`"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = AppError::config("duplicate source id `ny_511ny`");
        assert_eq!(
            err.to_string(),
            "configuration error: duplicate source id `ny_511ny`"
        );
    }
}
