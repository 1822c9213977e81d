//! Error type definitions.
//!
//! The validation error taxonomy plus initialization failures. Validation
//! failures are data, not control flow: they travel inside
//! [`ValidationResult`](crate::ValidationResult) and are never thrown across
//! the validator's public boundary.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use serde::Serialize;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// The four ways a stream can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIterMacro)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Connection-level failure: DNS, refused connection, reset, TLS.
    Network,
    /// The endpoint answered with a non-success HTTP status.
    Http,
    /// A check's deadline expired before it could conclude.
    Timeout,
    /// The audio stack rejected the stream's format.
    AudioCompatibility,
}

impl ErrorKind {
    /// Human-readable label used in logs and summaries.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Network => "network error",
            ErrorKind::Http => "HTTP error",
            ErrorKind::Timeout => "timeout",
            ErrorKind::AudioCompatibility => "audio compatibility error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed validation failure.
///
/// `retryable` is a policy hint for callers; the validator itself never
/// retries. The only built-in second chance is the media-compatibility
/// fallback when the accessibility probe is blocked at the transport layer.
#[derive(Error, Debug, Clone, Serialize)]
#[error("{kind}: {message}")]
pub struct ValidationError {
    /// Failure category.
    pub kind: ErrorKind,
    /// Human-readable detail, shown to the user as a tooltip.
    pub message: String,
    /// HTTP status code, present for `Http` errors only.
    pub http_status: Option<u16>,
    /// Whether retrying later could plausibly succeed.
    pub retryable: bool,
}

impl ValidationError {
    /// A connection-level failure. Retryable: the network may recover.
    pub fn network(message: impl Into<String>) -> Self {
        ValidationError {
            kind: ErrorKind::Network,
            message: message.into(),
            http_status: None,
            retryable: true,
        }
    }

    /// A non-success HTTP status. Server errors (>= 500) are retryable,
    /// client errors are not.
    pub fn http(status: u16) -> Self {
        ValidationError {
            kind: ErrorKind::Http,
            message: format!("HTTP {status}"),
            http_status: Some(status),
            retryable: status >= 500,
        }
    }

    /// A check deadline expired. Retryable by default; the media checker
    /// downgrades this with [`non_retryable`](Self::non_retryable).
    pub fn timeout(timeout_ms: u64) -> Self {
        ValidationError {
            kind: ErrorKind::Timeout,
            message: format!("timed out after {timeout_ms}ms"),
            http_status: None,
            retryable: true,
        }
    }

    /// The audio stack cannot play this stream. Never retryable: format
    /// incompatibility is a deterministic property of the stream.
    pub fn audio_compatibility(message: impl Into<String>) -> Self {
        ValidationError {
            kind: ErrorKind::AudioCompatibility,
            message: message.into(),
            http_status: None,
            retryable: false,
        }
    }

    /// Marks this error non-retryable, whatever its kind. Used for every
    /// media-path failure.
    pub fn non_retryable(mut self) -> Self {
        self.retryable = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_retryable_only_for_server_errors() {
        assert!(!ValidationError::http(404).retryable);
        assert!(!ValidationError::http(403).retryable);
        assert!(ValidationError::http(500).retryable);
        assert!(ValidationError::http(503).retryable);
    }

    #[test]
    fn http_error_carries_status() {
        let err = ValidationError::http(404);
        assert_eq!(err.http_status, Some(404));
        assert_eq!(err.kind, ErrorKind::Http);
    }

    #[test]
    fn non_retryable_downgrade() {
        let err = ValidationError::timeout(1500).non_retryable();
        assert_eq!(err.kind, ErrorKind::Timeout);
        assert!(!err.retryable);
    }

    #[test]
    fn audio_compatibility_never_retryable() {
        assert!(!ValidationError::audio_compatibility("unsupported container").retryable);
    }
}
