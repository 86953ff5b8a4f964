//! Command-line interface definitions.
//!
//! Every option can also be supplied through an environment variable, and
//! all of them are optional: with no arguments the full roster is fetched
//! and written to `traffic_cameras_aggregated.json`.

use clap::Parser;

/// Poll public traffic-camera feeds and write one normalized JSON report.
///
/// # Examples
///
/// ```sh
/// # Fetch every built-in source
/// traffic_cam_aggregator
///
/// # Write somewhere else, with a gentler pace
/// traffic_cam_aggregator -o ./out/cameras.json --delay-ms 1500
///
/// # Only the Caltrans Bay Area and LA districts
/// traffic_cam_aggregator --only ca_caltrans_d4 --only ca_caltrans_d7
///
/// # Show the roster and the sources that need credentials
/// traffic_cam_aggregator --list-sources
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path of the aggregate JSON report
    #[arg(short, long, env = "CAMERAS_OUTPUT")]
    pub output: Option<String>,

    /// Optional path to a YAML settings file
    #[arg(short, long, env = "CAMERAS_CONFIG")]
    pub config: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "CAMERAS_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Pause between sources in milliseconds
    #[arg(long, env = "CAMERAS_DELAY_MS")]
    pub delay_ms: Option<u64>,

    /// Fetch only these source ids (repeatable)
    #[arg(long = "only", value_name = "SOURCE_ID")]
    pub only: Vec<String>,

    /// Print the source roster and exit without fetching
    #[arg(long)]
    pub list_sources: bool,
}
