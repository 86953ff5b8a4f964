//! # Traffic Camera Aggregator
//!
//! Polls a fixed roster of public traffic-camera feeds, each published by a
//! different agency in a different JSON shape, normalizes every camera into
//! one canonical record, and writes a single aggregate JSON report.
//!
//! ## Features
//!
//! - 27 built-in sources: NYC DOT, thirteen 511 systems, all twelve Caltrans
//!   districts, and Maryland CHART
//! - Four format adapters (direct array, 511, Caltrans, `ArcGIS`)
//! - Per-source failure isolation: one bad feed never aborts the run
//! - A catalogue of credential-gated feeds, listed but never fetched
//!
//! ## Usage
//!
//! ```sh
//! traffic_cam_aggregator -o ./traffic_cameras_aggregated.json
//! ```
//!
//! ## Architecture
//!
//! 1. **Registry**: built-in roster plus settings-file additions, validated up front
//! 2. **Fetch**: one GET per source, in order, with a pause between sources
//! 3. **Adapt**: parse JSON and map it onto the canonical camera schema
//! 4. **Aggregate**: collect successes and failures into one report
//! 5. **Output**: write the JSON report and print a summary

use clap::Parser;
use std::error::Error;
use std::path::Path;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod adapters;
mod aggregator;
mod cli;
mod config;
mod error;
mod fetcher;
mod models;
mod outputs;
mod processor;
mod registry;
mod utils;

use cli::Cli;
use config::Settings;
use fetcher::HttpFetcher;
use outputs::{json, summary};
use registry::Registry;
use utils::ensure_writable_parent;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("traffic_cam_aggregator starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // ---- Settings & registry: any problem here is fatal, before any request ----
    let settings = Settings::resolve(&args)?;
    let registry = Registry::builtin_with(settings.extra_sources.clone(), &settings.disabled_sources)?
        .retain_ids(&args.only)?;

    if args.list_sources {
        print!("{}", registry.describe());
        return Ok(());
    }

    let output = Path::new(&settings.output);
    if let Err(e) = ensure_writable_parent(output).await {
        error!(
            path = %settings.output,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    info!(
        sources = registry.sources().len(),
        auth_required = registry.auth_required().len(),
        timeout_secs = settings.timeout_secs,
        delay_ms = settings.delay_ms,
        "Processing verified sources"
    );

    // ---- Fetch, adapt, aggregate ----
    let fetcher = HttpFetcher::from_settings(&settings)?;
    let report = aggregator::run(&registry, &fetcher, settings.delay()).await;

    // ---- Output ----
    json::write_report(&report, output).await?;
    print!(
        "{}",
        summary::render(&report, registry.auth_required().len(), &settings.output)
    );

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
