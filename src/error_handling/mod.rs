//! Error handling: the validation taxonomy, transport-error
//! categorization, and run statistics.

mod categorization;
mod stats;
mod types;

pub use categorization::{categorize_reqwest_error, is_probe_blocked};
pub use stats::ValidationStats;
pub use types::{ErrorKind, InitializationError, ValidationError};
