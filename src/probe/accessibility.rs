//! Accessibility probe.
//!
//! A short-lived network reachability check, independent of media decoding:
//! confirm the endpoint answers with a success status, then hang up.

use std::time::Duration;

use log::debug;
use reqwest::header::ACCEPT;

use crate::config::{ACCESSIBILITY_ACCEPT_HEADER, ACCESSIBILITY_TIMEOUT_CAP_MS};
use crate::error_handling::{categorize_reqwest_error, is_probe_blocked, ValidationError};

/// An accessibility probe failure.
///
/// `probe_blocked` is true when the request died at the transport layer
/// before any HTTP exchange, which is the one condition that makes the
/// validator fall back to a media-only check.
#[derive(Debug)]
pub struct AccessibilityFailure {
    /// The categorized failure.
    pub error: ValidationError,
    /// Whether the probe itself was blocked rather than cleanly refused.
    pub probe_blocked: bool,
}

/// Probes `url` for basic reachability.
///
/// Issues a GET with `Accept: audio/*` under a deadline of
/// `min(timeout, 3000ms)`. The response body is never read: receiving
/// success headers is the whole point, and dropping the response cancels
/// the in-flight transfer so no stream data is downloaded.
pub async fn check_accessibility(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
) -> Result<(), AccessibilityFailure> {
    let deadline = timeout.min(Duration::from_millis(ACCESSIBILITY_TIMEOUT_CAP_MS));

    let request = client
        .get(url)
        .header(ACCEPT, ACCESSIBILITY_ACCEPT_HEADER)
        .timeout(deadline);

    let response = match tokio::time::timeout(deadline, request.send()).await {
        Err(_) => {
            return Err(AccessibilityFailure {
                error: ValidationError::timeout(deadline.as_millis() as u64),
                probe_blocked: false,
            });
        }
        Ok(Err(err)) => {
            let probe_blocked = is_probe_blocked(&err);
            let mut error = categorize_reqwest_error(&err);
            if error.kind == crate::error_handling::ErrorKind::Timeout {
                error = ValidationError::timeout(deadline.as_millis() as u64);
            }
            debug!("accessibility probe failed for {url}: {err} (blocked: {probe_blocked})");
            return Err(AccessibilityFailure {
                error,
                probe_blocked,
            });
        }
        Ok(Ok(response)) => response,
    };

    let status = response.status();
    // Hang up before any body bytes transfer.
    drop(response);

    if status.is_success() {
        Ok(())
    } else {
        Err(AccessibilityFailure {
            error: ValidationError::http(status.as_u16()),
            probe_blocked: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::ErrorKind;

    #[tokio::test]
    async fn refused_connection_reports_blocked_network_error() {
        let client = reqwest::Client::new();
        let failure = check_accessibility(&client, "http://127.0.0.1:1/stream", Duration::from_secs(5))
            .await
            .expect_err("nothing listens on port 1");

        assert_eq!(failure.error.kind, ErrorKind::Network);
        assert!(failure.error.retryable);
        assert!(failure.probe_blocked);
    }
}
