//! stream_status library: internet-radio stream validation.
//!
//! Given candidate station URLs from a directory search, this library
//! determines concurrently, within bounded time, which streams are
//! actually reachable and playable. Each URL gets a cheap reachability
//! probe and an audio-stack compatibility probe; results are cached with
//! asymmetric TTLs (known-good streams for a day, failures for five
//! minutes) and batch runs report per-station progress as it happens.
//!
//! # Example
//!
//! ```no_run
//! use stream_status::{Station, StreamValidator, ValidationProgress};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let validator = StreamValidator::new()?;
//!
//! let stations = vec![
//!     Station::from_url("http://ice2.somafm.com/groovesalad-128-mp3"),
//! ];
//!
//! let outcome = validator
//!     .validate_stations_streaming(
//!         &stations,
//!         |state| println!("{}: {:?}", state.station_uuid, state.status),
//!         Some(|progress: ValidationProgress| {
//!             println!("{}% complete", progress.percent_complete)
//!         }),
//!     )
//!     .await;
//!
//! println!("{} playable streams", outcome.valid_stations.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or call library functions from within an async context.

#![warn(missing_docs)]

pub mod app;
mod cache;
pub mod config;
mod error_handling;
pub mod initialization;
mod models;
mod probe;
mod validator;

// Re-export public API
pub use config::{Cli, LogFormat, LogLevel, ValidatorConfig, ValidatorConfigUpdate};
pub use error_handling::{ErrorKind, InitializationError, ValidationError, ValidationStats};
pub use models::{
    BatchValidationResult, Station, StationStatus, StationValidationState, ValidationProgress,
    ValidationResult,
};
pub use validator::StreamValidator;
