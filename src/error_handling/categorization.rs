//! Error categorization.
//!
//! Maps transport-layer errors onto the validation taxonomy and decides
//! when the accessibility probe counts as "blocked" rather than failed.

use super::types::ValidationError;

/// Categorizes a `reqwest::Error` into a [`ValidationError`].
///
/// Status-bearing errors become `Http`; timeouts become `Timeout`;
/// everything else is a connection-level `Network` failure.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> ValidationError {
    if let Some(status) = error.status() {
        return ValidationError::http(status.as_u16());
    }

    if error.is_timeout() {
        // reqwest's own timeout, distinct from our outer deadline. The
        // caller overwrites the message with its configured deadline when
        // it owns the clock.
        return ValidationError {
            message: format!("request timed out: {error}"),
            ..ValidationError::timeout(0)
        };
    }

    ValidationError::network(error.to_string())
}

/// Whether an accessibility-probe error means the probe itself was blocked
/// at the transport layer, as opposed to the endpoint cleanly refusing.
///
/// Only such failures trigger the media-compatibility fallback: a stream
/// can be reachable by the playback stack even when a generic GET is
/// rejected before any HTTP exchange happens (TLS interception, proxy
/// policy, protocol quirks of Shoutcast-era servers). A clean HTTP error
/// or a deadline expiry never falls back.
pub fn is_probe_blocked(error: &reqwest::Error) -> bool {
    if error.status().is_some() || error.is_timeout() {
        return false;
    }
    error.is_connect() || error.is_request()
}
