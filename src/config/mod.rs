//! Configuration: runtime options, CLI parsing, and operational constants.

mod constants;
mod types;

pub use constants::*;
pub use types::{Cli, LogFormat, LogLevel, ValidatorConfig, ValidatorConfigUpdate};
