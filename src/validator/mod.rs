//! The stream validator.
//!
//! [`StreamValidator`] composes the accessibility and media-compatibility
//! probes per URL, owns the result cache and the in-flight batch's
//! cancellation token, and exposes single-URL and streaming batch
//! validation. Construct one per player instance via [`StreamValidator::new`]
//! or [`StreamValidator::with_config`]; there is no global singleton.

mod batch;
mod checks;

use std::sync::{Arc, Mutex, RwLock};

use tokio_util::sync::CancellationToken;

use crate::cache::ValidationCache;
use crate::config::{ValidatorConfig, ValidatorConfigUpdate};
use crate::error_handling::{InitializationError, ValidationStats};
use crate::initialization::init_client;
use crate::models::ValidationResult;

pub(crate) use checks::validate_url;

/// Validates internet-radio stream URLs.
///
/// All methods take `&self`; the validator is safe to share behind an
/// `Arc` across tasks. One batch run is tracked at a time: starting a new
/// batch installs a fresh cancellation token, and [`cancel_validation`]
/// (idempotent, a no-op when idle) signals the current one.
///
/// [`cancel_validation`]: StreamValidator::cancel_validation
pub struct StreamValidator {
    client: reqwest::Client,
    cache: ValidationCache,
    config: RwLock<ValidatorConfig>,
    cancel: Mutex<CancellationToken>,
    stats: Arc<ValidationStats>,
}

impl StreamValidator {
    /// Creates a validator with default configuration.
    pub fn new() -> Result<Self, InitializationError> {
        Self::with_config(ValidatorConfig::default())
    }

    /// Creates a validator with the given configuration.
    pub fn with_config(config: ValidatorConfig) -> Result<Self, InitializationError> {
        let client = init_client()?;
        Ok(StreamValidator {
            client,
            cache: ValidationCache::new(),
            config: RwLock::new(config),
            cancel: Mutex::new(CancellationToken::new()),
            stats: Arc::new(ValidationStats::new()),
        })
    }

    /// Validates a single stream URL.
    ///
    /// Consults the cache first when caching is enabled; a hit is returned
    /// with `cached = true` and an otherwise identical payload. A computed
    /// result is cached with the success/failure TTL asymmetry before being
    /// returned. Failures come back as data; this method never errors.
    pub async fn validate_stream(&self, url: &str) -> ValidationResult {
        let config = self.current_config();

        if config.enable_cache {
            if let Some(mut hit) = self.cache.get(url) {
                self.stats.increment_cache_hit();
                hit.cached = true;
                return hit;
            }
        }

        let result = validate_url(
            self.client.clone(),
            url.to_string(),
            config.clone(),
            Arc::clone(&self.stats),
        )
        .await;

        self.record_result(&result, &config);
        result
    }

    /// Signals cancellation of the batch currently in flight.
    ///
    /// Idempotent; calling with no batch running is a no-op. Stations that
    /// already reached a terminal state keep it; unresolved stations end up
    /// in the batch result's `pending_stations`.
    pub fn cancel_validation(&self) {
        self.cancel.lock().expect("cancel mutex poisoned").cancel();
    }

    /// Drops every cached validation result.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Applies a partial configuration update. Affects operations started
    /// after the call; in-flight work keeps the snapshot it started with.
    pub fn update_config(&self, update: ValidatorConfigUpdate) {
        self.config
            .write()
            .expect("config lock poisoned")
            .apply(update);
    }

    /// Returns the current configuration.
    pub fn get_config(&self) -> ValidatorConfig {
        self.current_config()
    }

    /// Shared statistics counters for this validator.
    pub fn stats(&self) -> &ValidationStats {
        &self.stats
    }

    /// Number of cached results (observability only).
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    fn current_config(&self) -> ValidatorConfig {
        self.config.read().expect("config lock poisoned").clone()
    }

    /// Books a terminal result into the stats and, when enabled, the cache.
    fn record_result(&self, result: &ValidationResult, config: &ValidatorConfig) {
        match &result.error {
            Some(error) => self.stats.increment_error(error.kind),
            None => self.stats.increment_valid(),
        }
        if config.enable_cache {
            self.cache.put(result.clone(), config.cache_timeout);
        }
    }

    /// Installs and returns a fresh cancellation token for a new batch run.
    fn fresh_cancel_token(&self) -> CancellationToken {
        let token = CancellationToken::new();
        *self.cancel.lock().expect("cancel mutex poisoned") = token.clone();
        token
    }
}
