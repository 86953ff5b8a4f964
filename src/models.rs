//! Data models for sources, camera records, and the aggregate report.
//!
//! This module defines the structures shared by every stage of the pipeline:
//! - [`CameraRecord`]: the canonical camera schema every adapter produces
//! - [`SourceDescriptor`] / [`AuthRequiredSource`]: registry entries
//! - [`SourceResult`]: one source's cameras plus provenance
//! - [`AggregateReport`]: the document handed to the writer
//!
//! Optional fields serialize as explicit `null` rather than being skipped, so
//! every camera object in the output carries the same nine keys.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// API type recorded on every source result.
pub const DEFAULT_API_TYPE: &str = "REST/JSON";

/// Liveness of a camera as reported by its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraStatus {
    Online,
    Offline,
}

impl CameraStatus {
    /// Status from an upstream string-typed boolean.
    ///
    /// Only the literal string `"true"` means online. Native JSON `true`,
    /// `"True"`, `1` and missing values are all offline.
    pub fn from_string_flag(value: Option<&Value>) -> Self {
        match value {
            Some(Value::String(s)) if s == "true" => Self::Online,
            _ => Self::Offline,
        }
    }
}

/// One traffic camera, as reported by exactly one source at fetch time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraRecord {
    /// Source-local identifier. Not unique across sources.
    pub camera_id: String,
    /// Human-readable label; may be empty.
    pub name: String,
    /// `None` when the source omits or malforms the value, never `0.0`.
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Still frame URL, taken verbatim or synthesized from the source URL.
    pub image_url: Option<String>,
    pub stream_url: Option<String>,
    pub direction: Option<String>,
    pub road: Option<String>,
    pub status: CameraStatus,
    /// Source-specific auxiliary fields, preserved verbatim.
    pub raw_metadata: Map<String, Value>,
}

/// Which format adapter a source requires.
///
/// Accepts the historical processor names (`nyc_dot`, `511_system`) as
/// aliases so older roster files keep loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdapterKind {
    #[serde(rename = "direct_array", alias = "nyc_dot")]
    DirectArray,
    #[serde(rename = "511_system", alias = "system511")]
    System511,
    #[serde(rename = "caltrans")]
    Caltrans,
    #[serde(rename = "arcgis")]
    ArcGis,
}

impl AdapterKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DirectArray => "direct_array",
            Self::System511 => "511_system",
            Self::Caltrans => "caltrans",
            Self::ArcGis => "arcgis",
        }
    }
}

impl fmt::Display for AdapterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

fn default_api_type() -> String {
    DEFAULT_API_TYPE.to_string()
}

/// A fetchable source. Immutable for the lifetime of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    /// Globally unique, stable across runs (e.g. `"ca_caltrans_d7"`).
    pub id: String,
    pub name: String,
    /// State or region code (e.g. `"CA"`, `"ME/VT/NH"`).
    pub state: String,
    /// e.g. `"City"`, `"State"`, `"State District"`, `"Regional"`.
    pub jurisdiction_type: String,
    pub url: String,
    #[serde(alias = "adapter_kind")]
    pub adapter: AdapterKind,
    #[serde(default = "default_api_type")]
    pub api_type: String,
}

impl SourceDescriptor {
    pub fn new(
        id: &str,
        name: &str,
        state: &str,
        jurisdiction_type: &str,
        url: &str,
        adapter: AdapterKind,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            state: state.to_string(),
            jurisdiction_type: jurisdiction_type.to_string(),
            url: url.to_string(),
            adapter,
            api_type: default_api_type(),
        }
    }
}

/// A source known to require authentication. Catalogued, never fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthRequiredSource {
    pub state: String,
    pub name: String,
    pub url: String,
    pub notes: String,
}

/// The cameras obtained from one source, with provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceResult {
    pub source_id: String,
    pub source_name: String,
    pub source_url: String,
    pub state: String,
    pub jurisdiction_type: String,
    pub last_fetched: DateTime<Utc>,
    pub api_type: String,
    pub camera_count: usize,
    pub cameras: Vec<CameraRecord>,
}

impl SourceResult {
    /// Wrap adapter output with the descriptor's provenance.
    pub fn new(source: &SourceDescriptor, cameras: Vec<CameraRecord>, fetched_at: DateTime<Utc>) -> Self {
        Self {
            source_id: source.id.clone(),
            source_name: source.name.clone(),
            source_url: source.url.clone(),
            state: source.state.clone(),
            jurisdiction_type: source.jurisdiction_type.clone(),
            last_fetched: fetched_at,
            api_type: source.api_type.clone(),
            camera_count: cameras.len(),
            cameras,
        }
    }
}

/// Run-level accounting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub total_cameras: usize,
    pub sources_processed: usize,
    pub sources_failed: usize,
    pub failed_sources: Vec<String>,
    pub sources_requiring_auth: Vec<String>,
    pub notes: String,
}

/// The single output document of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    pub metadata: ReportMetadata,
    pub sources: Vec<SourceResult>,
}
