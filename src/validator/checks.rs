//! The per-URL validation policy chain.
//!
//! Order of operations for one URL (cache consult happens in the caller):
//!
//! 1. Accessibility probe.
//! 2. If it was blocked at the transport layer, fall back to the media
//!    compatibility check alone and trust its verdict: some streams are
//!    reachable by the playback stack even when a generic probe is
//!    rejected before any HTTP exchange.
//! 3. If it failed any other way, the stream is invalid; the media check
//!    is skipped.
//! 4. If it succeeded, the media check must also pass: a stream is valid
//!    only when it is both reachable and playable.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use log::debug;

use crate::config::ValidatorConfig;
use crate::error_handling::ValidationStats;
use crate::models::ValidationResult;
use crate::probe::{check_accessibility, check_media_compatibility, CheckResult};

/// Runs the full check chain for `url` and packages the outcome.
///
/// Owned arguments keep this spawnable: batch validation runs it inside
/// tasks that must not borrow the validator.
pub(crate) async fn validate_url(
    client: reqwest::Client,
    url: String,
    config: ValidatorConfig,
    stats: Arc<ValidationStats>,
) -> ValidationResult {
    let started = Instant::now();
    let outcome = run_checks(&client, &url, &config, &stats).await;

    ValidationResult {
        is_valid: outcome.is_ok(),
        error: outcome.err(),
        response_time_ms: started.elapsed().as_millis() as u64,
        last_checked: Utc::now(),
        cached: false,
        url,
    }
}

async fn run_checks(
    client: &reqwest::Client,
    url: &str,
    config: &ValidatorConfig,
    stats: &ValidationStats,
) -> CheckResult {
    match check_accessibility(client, url, config.timeout).await {
        Ok(()) => check_media_compatibility(client, url, config.timeout).await,
        Err(failure) if failure.probe_blocked => {
            // When the fallback also fails, its error is what gets
            // reported; the probe error survives only in the debug log.
            debug!(
                "accessibility probe blocked for {url} ({}); trying media check alone",
                failure.error
            );
            stats.increment_media_fallback();
            check_media_compatibility(client, url, config.timeout).await
        }
        Err(failure) => Err(failure.error),
    }
}
