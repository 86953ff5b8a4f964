//! Format adapters: raw upstream JSON to canonical [`CameraRecord`]s.
//!
//! Each upstream family publishes cameras in its own shape. An adapter is a
//! plain function that walks one shape and yields canonical records, so the
//! dispatch is a table lookup on [`AdapterKind`] rather than a trait object.
//!
//! # Supported Formats
//!
//! | Kind | Module | Top-level shape | Liveness |
//! |------|--------|-----------------|----------|
//! | `direct_array` | [`direct`] | `[ {id, name, latitude, ...} ]` | `isOnline == "true"` |
//! | `511_system` | [`system511`] | `{ item2: [ {itemId, location: [lat, lon]} ] }` | none, always online |
//! | `caltrans` | [`caltrans`] | `{ data: [ {cctv: {location, imageData}} ] }` | `inService == "true"` |
//! | `arcgis` | [`arcgis`] | `{ features: [ {attributes, geometry} ] }` | none, always online |
//!
//! # Contract
//!
//! - Missing or malformed optional fields become `None` (or an empty string
//!   for `camera_id` / `name`); they never shrink the output.
//! - A missing envelope key, or a top-level value or collection entry of the
//!   wrong JSON type, is an [`AdapterError`].
//! - An empty result is `Ok(vec![])`; the processor decides what that means.

pub mod arcgis;
pub mod caltrans;
pub mod direct;
mod fields;
pub mod system511;

use crate::error::AdapterError;
use crate::models::{AdapterKind, CameraRecord, SourceDescriptor};
use serde_json::Value;

/// Signature shared by every adapter.
pub type AdapterFn = fn(&Value, &SourceDescriptor) -> Result<Vec<CameraRecord>, AdapterError>;

/// Resolve the adapter for a source kind.
pub fn adapter_for(kind: AdapterKind) -> AdapterFn {
    match kind {
        AdapterKind::DirectArray => direct::adapt,
        AdapterKind::System511 => system511::adapt,
        AdapterKind::Caltrans => caltrans::adapt,
        AdapterKind::ArcGis => arcgis::adapt,
    }
}

/// Run the adapter named by `source.adapter` over `data`.
pub fn adapt(data: &Value, source: &SourceDescriptor) -> Result<Vec<CameraRecord>, AdapterError> {
    adapter_for(source.adapter)(data, source)
}
