//! 511-style traveller information feeds (`/map/mapIcons/Cameras`).
//!
//! Many state 511 sites run the same map backend, which answers with an
//! icon descriptor in `item1` and the camera list in `item2`:
//!
//! ```json
//! {"item1": {...}, "item2": [
//!   {"itemId": "1204", "title": "I-95 at Exit 12", "location": [40.71, -74.0],
//!    "expando": {"videoEnabled": true, "videoUrl": "https://.../playlist.m3u8"}}
//! ]}
//! ```
//!
//! The feed carries no still-image link, so `image_url` is built from the
//! site root plus `/map/Cameras/<itemId>`. There is no liveness signal either;
//! every camera is reported online.

use super::fields::{
    array_field, coordinate, entry_object, expect_object, object_field, present, string_field,
    text_or_empty,
};
use crate::error::AdapterError;
use crate::models::{CameraRecord, CameraStatus, SourceDescriptor};
use serde_json::{Map, Value};

const ENVELOPE: &str = "item2";
const VIDEO_URL_KEYS: [&str; 2] = ["videoUrl", "VideoUrl"];

pub fn adapt(data: &Value, source: &SourceDescriptor) -> Result<Vec<CameraRecord>, AdapterError> {
    let root = expect_object(data, "$")?;
    let base_url = site_root(&source.url);

    array_field(root, ENVELOPE)?
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let cam = entry_object(item, "$.item2", i)?;
            Ok(camera(cam, base_url))
        })
        .collect()
}

/// Everything before the last `/map/` segment of the feed URL.
fn site_root(url: &str) -> &str {
    url.rsplit_once("/map/").map_or(url, |(root, _)| root)
}

fn camera(cam: &Map<String, Value>, base_url: &str) -> CameraRecord {
    let expando = object_field(cam, "expando");
    let location = cam.get("location").and_then(Value::as_array);
    let item_id = text_or_empty(cam.get("itemId"));

    CameraRecord {
        image_url: Some(format!("{base_url}/map/Cameras/{item_id}")),
        camera_id: item_id,
        name: text_or_empty(cam.get("title")),
        latitude: coordinate(location.and_then(|loc| loc.first())),
        longitude: coordinate(location.and_then(|loc| loc.get(1))),
        stream_url: stream_url(cam, expando),
        direction: None,
        road: None,
        status: CameraStatus::Online,
        raw_metadata: video_metadata(cam, expando),
    }
}

/// Item-level keys win over the nested `expando` object.
fn stream_url(cam: &Map<String, Value>, expando: &Map<String, Value>) -> Option<String> {
    [cam, expando]
        .into_iter()
        .flat_map(|obj| VIDEO_URL_KEYS.iter().map(move |key| (obj, *key)))
        .find_map(|(obj, key)| string_field(obj, key))
}

fn video_metadata(cam: &Map<String, Value>, expando: &Map<String, Value>) -> Map<String, Value> {
    let mut meta = Map::new();
    let item_level = present(cam, "videoEnabled");
    if item_level.is_none() && expando.is_empty() {
        return meta;
    }
    let enabled = item_level
        .or_else(|| present(expando, "videoEnabled"))
        .cloned()
        .unwrap_or(Value::Bool(false));
    meta.insert("videoEnabled".to_string(), enabled);
    meta
}
