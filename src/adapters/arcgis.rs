//! `ArcGIS` REST `MapServer`/`FeatureServer` query results (`f=json`).
//!
//! Each feature wraps an `attributes` object and a `geometry` point. Feeds
//! disagree on attribute naming, so the id and coordinates fall back:
//! `OBJECTID` → `feedID` for the id, `lat`/`long` attributes → geometry
//! `y`/`x` for position. There is no liveness attribute.

use super::fields::{
    array_field, coordinate, entry_object, expect_object, object_field, present, string_field,
    text_or_empty, verbatim,
};
use crate::error::AdapterError;
use crate::models::{CameraRecord, CameraStatus, SourceDescriptor};
use serde_json::{Map, Value};

pub fn adapt(data: &Value, _source: &SourceDescriptor) -> Result<Vec<CameraRecord>, AdapterError> {
    let root = expect_object(data, "$")?;
    array_field(root, "features")?
        .iter()
        .enumerate()
        .map(|(i, feature)| {
            let feature = entry_object(feature, "$.features", i)?;
            Ok(camera(feature))
        })
        .collect()
}

fn camera(feature: &Map<String, Value>) -> CameraRecord {
    let attrs = object_field(feature, "attributes");
    let geometry = object_field(feature, "geometry");

    let camera_id = present(attrs, "OBJECTID").or_else(|| present(attrs, "feedID"));
    let name = present(attrs, "location").or_else(|| present(attrs, "name"));
    let latitude = present(attrs, "lat").or_else(|| present(geometry, "y"));
    let longitude = present(attrs, "long").or_else(|| present(geometry, "x"));

    let mut raw_metadata = Map::new();
    raw_metadata.insert("county".to_string(), verbatim(attrs, "county"));
    raw_metadata.insert("feedID".to_string(), verbatim(attrs, "feedID"));

    CameraRecord {
        camera_id: text_or_empty(camera_id),
        name: text_or_empty(name),
        latitude: coordinate(latitude),
        longitude: coordinate(longitude),
        image_url: string_field(attrs, "url"),
        stream_url: None,
        direction: None,
        road: None,
        status: CameraStatus::Online,
        raw_metadata,
    }
}
