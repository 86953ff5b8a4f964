//! Per-source processing: fetch, parse, adapt, wrap.
//!
//! The stages run in order and the first one that fails decides the
//! outcome, so every source reports exactly one [`SourceFailure`]:
//!
//! | Stage | Failure |
//! |-------|---------|
//! | fetch | [`SourceFailure::Fetch`] |
//! | JSON parse | [`SourceFailure::Parse`] |
//! | adapter | [`SourceFailure::Adapter`] |
//! | zero cameras | [`SourceFailure::Empty`] |
//!
//! A zero-camera result from a feed that normally lists hundreds usually means
//! the upstream shape changed, so it is reported as a failure rather than
//! forwarded as a success.

use crate::adapters;
use crate::error::SourceFailure;
use crate::fetcher::FetchText;
use crate::models::{SourceDescriptor, SourceResult};
use chrono::Utc;
use tracing::{debug, instrument};

/// Fetch one source and turn its payload into a [`SourceResult`].
///
/// # Errors
///
/// Returns the first [`SourceFailure`] encountered. Nothing else escapes.
#[instrument(level = "info", skip_all, fields(source = %source.id, adapter = %source.adapter))]
pub async fn process_source<F: FetchText>(
    fetcher: &F,
    source: &SourceDescriptor,
) -> Result<SourceResult, SourceFailure> {
    let body = fetcher.fetch(&source.url).await.map_err(|e| {
        debug!(reason = %e.reason, "Fetch stage failed");
        SourceFailure::Fetch(e)
    })?;

    let data: serde_json::Value = serde_json::from_str(&body).map_err(SourceFailure::Parse)?;

    let cameras = adapters::adapt(&data, source).map_err(SourceFailure::Adapter)?;
    if cameras.is_empty() {
        return Err(SourceFailure::Empty);
    }

    debug!(cameras = cameras.len(), "Adapter produced cameras");
    Ok(SourceResult::new(source, cameras, Utc::now()))
}
