//! Validation statistics tracking.
//!
//! Thread-safe counters shared across concurrent validation tasks, used for
//! the end-of-run summary and progress logging.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::ErrorKind;

/// Thread-safe validation statistics tracker.
///
/// Counts valid streams, failures per [`ErrorKind`], cache hits, and how
/// often the media-compatibility fallback ran. All counters start at zero
/// and are safe to bump from any task through an `Arc`.
pub struct ValidationStats {
    errors: HashMap<ErrorKind, AtomicUsize>,
    valid: AtomicUsize,
    cache_hits: AtomicUsize,
    media_fallbacks: AtomicUsize,
}

impl ValidationStats {
    /// Creates a tracker with every counter at zero.
    pub fn new() -> Self {
        let mut errors = HashMap::new();
        for kind in ErrorKind::iter() {
            errors.insert(kind, AtomicUsize::new(0));
        }
        ValidationStats {
            errors,
            valid: AtomicUsize::new(0),
            cache_hits: AtomicUsize::new(0),
            media_fallbacks: AtomicUsize::new(0),
        }
    }

    /// Increment the failure counter for an error kind.
    ///
    /// Every kind is initialized in the constructor, so the lookup cannot
    /// miss; if it somehow does, log and continue rather than panic.
    pub fn increment_error(&self, kind: ErrorKind) {
        if let Some(counter) = self.errors.get(&kind) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment error counter for {kind:?} which is not in the map. \
                 This indicates a bug in ValidationStats initialization."
            );
        }
    }

    /// Count one stream that validated successfully.
    pub fn increment_valid(&self) {
        self.valid.fetch_add(1, Ordering::Relaxed);
    }

    /// Count one result served from the cache.
    pub fn increment_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Count one media-only fallback taken after a blocked probe.
    pub fn increment_media_fallback(&self) {
        self.media_fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    /// Count for one error kind. Zero if the kind is somehow absent.
    pub fn error_count(&self, kind: ErrorKind) -> usize {
        self.errors
            .get(&kind)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Total failures across all kinds.
    pub fn total_errors(&self) -> usize {
        ErrorKind::iter().map(|kind| self.error_count(kind)).sum()
    }

    /// Number of streams that validated successfully.
    pub fn valid_count(&self) -> usize {
        self.valid.load(Ordering::SeqCst)
    }

    /// Number of results served from the cache.
    pub fn cache_hit_count(&self) -> usize {
        self.cache_hits.load(Ordering::SeqCst)
    }

    /// Number of media-only fallbacks taken after blocked probes.
    pub fn media_fallback_count(&self) -> usize {
        self.media_fallbacks.load(Ordering::SeqCst)
    }
}

impl Default for ValidationStats {
    fn default() -> Self {
        Self::new()
    }
}
