//! End-of-run statistics reporting.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorKind, ValidationStats};

/// Logs the per-kind failure counts and the notable event counters.
///
/// Kinds with a zero count are skipped to keep the summary readable.
pub fn print_validation_statistics(stats: &ValidationStats) {
    info!("Validation statistics:");
    info!("  playable streams: {}", stats.valid_count());

    let total_errors = stats.total_errors();
    if total_errors == 0 {
        info!("  failures: none");
    } else {
        info!("  failures: {total_errors}");
        for kind in ErrorKind::iter() {
            let count = stats.error_count(kind);
            if count > 0 {
                info!("    {}: {}", kind.as_str(), count);
            }
        }
    }

    if stats.cache_hit_count() > 0 {
        info!("  cache hits: {}", stats.cache_hit_count());
    }
    if stats.media_fallback_count() > 0 {
        info!(
            "  media-only fallbacks (blocked probes): {}",
            stats.media_fallback_count()
        );
    }
}
