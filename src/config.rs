//! Run settings.
//!
//! Settings come from three layers, later layers winning:
//! 1. Built-in defaults ([`Settings::default`])
//! 2. An optional YAML file (`--config`)
//! 3. Command-line flags and their environment variables
//!
//! The YAML file can also extend the roster with `extra_sources` and switch
//! built-in sources off with `disabled_sources`:
//!
//! ```yaml
//! timeout_secs: 20
//! delay_ms: 750
//! disabled_sources: [ak_511ak]
//! extra_sources:
//!   - id: ks_kandrive
//!     name: KanDrive
//!     state: KS
//!     jurisdiction_type: State
//!     url: https://www.kandrive.gov/map/mapIcons/Cameras
//!     adapter: 511_system
//! ```
//!
//! An `adapter` value that names no known format fails deserialization,
//! which stops the process before any request is made.

use crate::cli::Cli;
use crate::error::AppError;
use crate::models::SourceDescriptor;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{info, instrument};

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_DELAY_MS: u64 = 500;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; TrafficCameraAggregator/1.0)";
pub const DEFAULT_OUTPUT: &str = "traffic_cameras_aggregated.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Per-request timeout.
    pub timeout_secs: u64,
    /// Pause between consecutive sources.
    pub delay_ms: u64,
    /// Client identifier sent with every request.
    pub user_agent: String,
    /// Where the aggregate report is written.
    pub output: String,
    /// Sources appended after the built-in roster.
    pub extra_sources: Vec<SourceDescriptor>,
    /// Built-in source ids to skip.
    pub disabled_sources: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            delay_ms: DEFAULT_DELAY_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            output: DEFAULT_OUTPUT.to_string(),
            extra_sources: Vec::new(),
            disabled_sources: Vec::new(),
        }
    }
}

impl Settings {
    /// Parse settings from YAML text. Missing keys keep their defaults.
    pub fn from_yaml(text: &str) -> Result<Self, AppError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|e| AppError::config(format!("invalid settings: {e}")))
    }

    /// Load settings from a YAML file.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| AppError::config(format!("cannot read {}: {e}", path.display())))?;
        let settings = Self::from_yaml(&text)?;
        info!(
            extra_sources = settings.extra_sources.len(),
            disabled_sources = settings.disabled_sources.len(),
            "Loaded settings file"
        );
        Ok(settings)
    }

    /// Defaults, then the `--config` file if given, then CLI overrides.
    pub fn resolve(cli: &Cli) -> Result<Self, AppError> {
        let mut settings = match &cli.config {
            Some(path) => Self::load(Path::new(path))?,
            None => Self::default(),
        };
        if let Some(output) = &cli.output {
            settings.output = output.clone();
        }
        if let Some(timeout) = cli.timeout_secs {
            settings.timeout_secs = timeout;
        }
        if let Some(delay) = cli.delay_ms {
            settings.delay_ms = delay;
        }
        if settings.timeout_secs == 0 {
            return Err(AppError::config("timeout_secs must be greater than zero"));
        }
        Ok(settings)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}
