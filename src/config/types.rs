//! Configuration types and CLI options.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    ACCESSIBILITY_TIMEOUT_CAP_MS, DEFAULT_BATCH_SIZE, DEFAULT_SUCCESS_CACHE_TTL,
    DEFAULT_TIMEOUT_MS,
};

/// Logging level for the application.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Runtime configuration of a [`StreamValidator`](crate::StreamValidator).
///
/// Constructed with [`Default::default`] and adjusted either up front or at
/// runtime through `update_config`.
#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    /// Per-check timeout. Applies to both checkers; the accessibility probe
    /// is additionally capped at [`ACCESSIBILITY_TIMEOUT_CAP_MS`].
    pub timeout: Duration,
    /// Number of stations validated concurrently per batch group.
    pub batch_size: usize,
    /// Whether validation results are cached at all.
    pub enable_cache: bool,
    /// TTL for successful results. Failed results always expire after the
    /// fixed [`FAILURE_CACHE_TTL`](crate::config::FAILURE_CACHE_TTL).
    pub cache_timeout: Duration,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        ValidatorConfig {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            batch_size: DEFAULT_BATCH_SIZE,
            enable_cache: true,
            cache_timeout: DEFAULT_SUCCESS_CACHE_TTL,
        }
    }
}

impl ValidatorConfig {
    /// Effective deadline for the accessibility probe:
    /// `min(timeout, ACCESSIBILITY_TIMEOUT_CAP_MS)`.
    pub fn accessibility_timeout(&self) -> Duration {
        self.timeout
            .min(Duration::from_millis(ACCESSIBILITY_TIMEOUT_CAP_MS))
    }
}

/// Partial configuration update. `None` fields leave the current value
/// untouched.
#[derive(Debug, Clone, Default)]
pub struct ValidatorConfigUpdate {
    /// New per-check timeout.
    pub timeout: Option<Duration>,
    /// New batch group size. Zero is rejected and ignored with a warning.
    pub batch_size: Option<usize>,
    /// Toggle result caching.
    pub enable_cache: Option<bool>,
    /// New success-path cache TTL.
    pub cache_timeout: Option<Duration>,
}

impl ValidatorConfig {
    /// Applies a partial update in place.
    pub fn apply(&mut self, update: ValidatorConfigUpdate) {
        if let Some(timeout) = update.timeout {
            self.timeout = timeout;
        }
        if let Some(batch_size) = update.batch_size {
            if batch_size == 0 {
                log::warn!("Ignoring batch_size update of 0; keeping {}", self.batch_size);
            } else {
                self.batch_size = batch_size;
            }
        }
        if let Some(enable_cache) = update.enable_cache {
            self.enable_cache = enable_cache;
        }
        if let Some(cache_timeout) = update.cache_timeout {
            self.cache_timeout = cache_timeout;
        }
    }
}

/// Command-line options for the `stream_status` binary.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "stream_status",
    about = "Validates internet-radio stream URLs and reports per-station playability status."
)]
pub struct Cli {
    /// Station list: a radio-browser JSON export or a plain file with one
    /// stream URL per line. Use "-" to read URLs from stdin.
    pub file: PathBuf,

    /// Per-check timeout in milliseconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Stations validated concurrently per batch group
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Disable the validation result cache
    #[arg(long)]
    pub no_cache: bool,

    /// Write final per-station states as JSON lines to this file
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,
}

impl Cli {
    /// Builds the validator configuration implied by the CLI flags.
    pub fn validator_config(&self) -> ValidatorConfig {
        ValidatorConfig {
            timeout: Duration::from_millis(self.timeout_ms),
            batch_size: self.batch_size.max(1),
            enable_cache: !self.no_cache,
            ..ValidatorConfig::default()
        }
    }
}
