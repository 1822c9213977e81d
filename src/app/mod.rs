//! CLI-side application glue: input parsing, URL checks, progress
//! logging, statistics, and result export.

mod input;
mod logging;
mod output;
mod statistics;
mod url;

pub use input::{load_stations, parse_stations};
pub use logging::ProgressLogger;
pub use output::write_results;
pub use statistics::print_validation_statistics;
pub use url::validate_and_normalize_url;
