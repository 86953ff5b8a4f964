//! Direct-array feeds (NYC DOT style).
//!
//! The payload is a bare JSON array of flat camera objects:
//!
//! ```json
//! [{"id": "0bcfbc92", "name": "Broadway @ 42 St", "latitude": 40.75,
//!   "longitude": -73.98, "imageUrl": "https://...", "isOnline": "true",
//!   "area": "Manhattan"}]
//! ```
//!
//! `isOnline` is a string, not a JSON boolean.

use super::fields::{coordinate, entry_object, expect_array, string_field, text_or_empty};
use crate::error::AdapterError;
use crate::models::{CameraRecord, CameraStatus, SourceDescriptor};
use serde_json::{Map, Value};

pub fn adapt(data: &Value, _source: &SourceDescriptor) -> Result<Vec<CameraRecord>, AdapterError> {
    expect_array(data, "$")?
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let cam = entry_object(item, "$", i)?;
            Ok(camera(cam))
        })
        .collect()
}

fn camera(cam: &Map<String, Value>) -> CameraRecord {
    let mut raw_metadata = Map::new();
    raw_metadata.insert(
        "area".to_string(),
        cam.get("area").cloned().unwrap_or_else(|| Value::String(String::new())),
    );

    CameraRecord {
        camera_id: text_or_empty(cam.get("id")),
        name: text_or_empty(cam.get("name")),
        latitude: coordinate(cam.get("latitude")),
        longitude: coordinate(cam.get("longitude")),
        image_url: string_field(cam, "imageUrl"),
        stream_url: None,
        direction: None,
        road: None,
        status: CameraStatus::from_string_flag(cam.get("isOnline")),
        raw_metadata,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AdapterKind;
    use serde_json::json;

    fn nyc() -> SourceDescriptor {
        SourceDescriptor::new(
            "ny_nycdot",
            "NYC DOT",
            "NY",
            "City",
            "https://webcams.nyctmc.org/api/cameras",
            AdapterKind::DirectArray,
        )
    }

    #[test]
    fn test_maps_fields_one_to_one() {
        let data = json!([{
            "id": "0bcfbc92",
            "name": "Broadway @ 42 St",
            "latitude": 40.7566,
            "longitude": -73.9862,
            "imageUrl": "https://webcams.nyctmc.org/api/cameras/0bcfbc92/image",
            "isOnline": "true",
            "area": "Manhattan"
        }]);
        let cams = adapt(&data, &nyc()).unwrap();
        assert_eq!(cams.len(), 1);
        let cam = &cams[0];
        assert_eq!(cam.camera_id, "0bcfbc92");
        assert_eq!(cam.name, "Broadway @ 42 St");
        assert_eq!(cam.latitude, Some(40.7566));
        assert_eq!(cam.longitude, Some(-73.9862));
        assert_eq!(
            cam.image_url.as_deref(),
            Some("https://webcams.nyctmc.org/api/cameras/0bcfbc92/image")
        );
        assert_eq!(cam.stream_url, None);
        assert_eq!(cam.status, CameraStatus::Online);
        assert_eq!(cam.raw_metadata["area"], json!("Manhattan"));
    }

    #[test]
    fn test_only_string_true_is_online() {
        let data = json!([
            {"id": "a", "isOnline": "true"},
            {"id": "b", "isOnline": true},
            {"id": "c", "isOnline": "false"},
            {"id": "d"}
        ]);
        let statuses: Vec<CameraStatus> = adapt(&data, &nyc()).unwrap().into_iter().map(|c| c.status).collect();
        assert_eq!(
            statuses,
            vec![
                CameraStatus::Online,
                CameraStatus::Offline,
                CameraStatus::Offline,
                CameraStatus::Offline
            ]
        );
    }

    #[test]
    fn test_missing_location_stays_null() {
        let data = json!([{"id": "x", "latitude": null}]);
        let cam = &adapt(&data, &nyc()).unwrap()[0];
        assert_eq!(cam.latitude, None);
        assert_eq!(cam.longitude, None);
        assert_eq!(cam.image_url, None);
        assert_eq!(cam.name, "");
        assert_eq!(cam.raw_metadata["area"], json!(""));
    }

    #[test]
    fn test_non_array_payload_fails() {
        assert!(adapt(&json!({"cameras": []}), &nyc()).is_err());
        assert!(adapt(&json!([{"id": "a"}, "junk"]), &nyc()).is_err());
    }

    #[test]
    fn test_empty_array_is_ok() {
        assert!(adapt(&json!([]), &nyc()).unwrap().is_empty());
    }
}
