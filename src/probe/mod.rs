//! Stream probes.
//!
//! Two independent checks compose into a verdict about a stream URL:
//!
//! - [`check_accessibility`]: does the endpoint answer at all? A bounded
//!   GET that only cares about response headers.
//! - [`check_media_compatibility`]: would the local playback stack accept
//!   the stream? Fetches a bounded prefix of the body and asks the audio
//!   format detector.
//!
//! Each check owns its own deadline, so a hung probe can never stall a
//! batch beyond its own timeout.

mod accessibility;
mod media;

pub use accessibility::{check_accessibility, AccessibilityFailure};
pub use media::check_media_compatibility;

/// Outcome of a single probe: `Ok(())` means the check passed.
pub type CheckResult = Result<(), crate::error_handling::ValidationError>;
