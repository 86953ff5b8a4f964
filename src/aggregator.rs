//! The run loop: every source in the registry, one at a time, then the report.
//!
//! Sources are processed sequentially in roster order with a fixed pause
//! between them, whatever the previous outcome was. A failing source is
//! recorded by name and the loop carries on; nothing short of a process kill
//! stops a run early. All accumulation is local to [`run`], so repeated calls
//! are independent.

use crate::error::SourceFailure;
use crate::fetcher::FetchText;
use crate::models::{AggregateReport, ReportMetadata, SourceResult};
use crate::processor::process_source;
use crate::registry::Registry;
use crate::utils::truncate_for_log;
use chrono::Utc;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{info, instrument, warn};

/// Fixed note attached to every report.
pub const REPORT_NOTES: &str =
    "Some state DOTs require API keys or registration. See sources_requiring_auth for the sources that were not fetched.";

/// Longest failure reason shown on a progress line.
const REASON_MAX_CHARS: usize = 50;

/// Process every fetchable source and build the aggregate report.
#[instrument(level = "info", skip_all, fields(sources = registry.sources().len(), ?delay))]
pub async fn run<F: FetchText>(registry: &Registry, fetcher: &F, delay: Duration) -> AggregateReport {
    let t0 = Instant::now();
    let sources = registry.sources();
    let total = sources.len();

    let mut results: Vec<SourceResult> = Vec::new();
    let mut failed: Vec<String> = Vec::new();

    for (i, source) in sources.iter().enumerate() {
        if i > 0 && !delay.is_zero() {
            sleep(delay).await;
        }

        match process_source(fetcher, source).await {
            Ok(result) => {
                info!(
                    source = %source.id,
                    cameras = result.camera_count,
                    "[{}/{}] Fetching {}... OK ({} cameras)",
                    i + 1,
                    total,
                    source.name,
                    result.camera_count
                );
                results.push(result);
            }
            Err(failure) => {
                let reason = truncate_for_log(&failure.to_string(), REASON_MAX_CHARS);
                warn!(
                    source = %source.id,
                    kind = failure_kind(&failure),
                    "[{}/{}] Fetching {}... FAILED ({})",
                    i + 1,
                    total,
                    source.name,
                    reason
                );
                failed.push(source.name.clone());
            }
        }
    }

    let report = build_report(
        results,
        failed,
        registry.auth_required().iter().map(|a| a.name.clone()).collect(),
    );
    info!(
        total_cameras = report.metadata.total_cameras,
        processed = report.metadata.sources_processed,
        failed = report.metadata.sources_failed,
        elapsed_secs = t0.elapsed().as_secs(),
        "Run complete"
    );
    report
}

/// Assemble the report from the accumulated outcomes.
pub fn build_report(
    results: Vec<SourceResult>,
    failed: Vec<String>,
    requiring_auth: Vec<String>,
) -> AggregateReport {
    let total_cameras = results.iter().map(|r| r.camera_count).sum();
    AggregateReport {
        metadata: ReportMetadata {
            generated_at: Utc::now(),
            total_cameras,
            sources_processed: results.len(),
            sources_failed: failed.len(),
            failed_sources: failed,
            sources_requiring_auth: requiring_auth,
            notes: REPORT_NOTES.to_string(),
        },
        sources: results,
    }
}

fn failure_kind(failure: &SourceFailure) -> &'static str {
    match failure {
        SourceFailure::Fetch(_) => "fetch",
        SourceFailure::Parse(_) => "parse",
        SourceFailure::Adapter(_) => "adapter",
        SourceFailure::Empty => "empty",
    }
}
