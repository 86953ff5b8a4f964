//! Caltrans CWWP2 district feeds (`cctvStatusDNN.json`).
//!
//! ```json
//! {"data": [{"cctv": {
//!   "index": "1", "inService": "true",
//!   "location": {"locationName": "I-5 : Main St", "latitude": "34.05",
//!                "longitude": "-118.23", "direction": "North", "route": "I-5",
//!                "district": "7", "county": "Los Angeles", ...},
//!   "imageData": {"streamingVideoURL": "https://...m3u8",
//!                 "static": {"currentImageURL": "https://...jpg"}}
//! }}]}
//! ```
//!
//! Coordinates arrive as strings. An empty string means the position is
//! unknown and must stay `None`; `"0"` is a real (if unlikely) zero.

use super::fields::{
    array_field, coordinate, entry_object, expect_object, object_field, string_field, text_or_empty,
    verbatim,
};
use crate::error::AdapterError;
use crate::models::{CameraRecord, CameraStatus, SourceDescriptor};
use serde_json::{Map, Value};

/// Location fields copied into `raw_metadata` as-is.
const LOCATION_METADATA: [&str; 6] = [
    "district",
    "county",
    "nearbyPlace",
    "elevation",
    "postmile",
    "milepost",
];

pub fn adapt(data: &Value, _source: &SourceDescriptor) -> Result<Vec<CameraRecord>, AdapterError> {
    let root = expect_object(data, "$")?;
    array_field(root, "data")?
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let item = entry_object(item, "$.data", i)?;
            Ok(camera(object_field(item, "cctv")))
        })
        .collect()
}

fn camera(cctv: &Map<String, Value>) -> CameraRecord {
    let location = object_field(cctv, "location");
    let image_data = object_field(cctv, "imageData");
    let still = object_field(image_data, "static");

    let raw_metadata = LOCATION_METADATA
        .iter()
        .map(|key| (key.to_string(), verbatim(location, key)))
        .collect();

    CameraRecord {
        camera_id: text_or_empty(cctv.get("index")),
        name: text_or_empty(location.get("locationName")),
        latitude: coordinate(location.get("latitude")),
        longitude: coordinate(location.get("longitude")),
        image_url: string_field(still, "currentImageURL"),
        stream_url: string_field(image_data, "streamingVideoURL"),
        direction: string_field(location, "direction"),
        road: string_field(location, "route"),
        status: CameraStatus::from_string_flag(cctv.get("inService")),
        raw_metadata,
    }
}
