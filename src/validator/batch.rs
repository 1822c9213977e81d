//! Streaming batch validation.
//!
//! Stations are partitioned into fixed-size groups. Within a group every
//! station validates concurrently and reports its own result the moment it
//! resolves; only group-to-group sequencing is serialized, which bounds the
//! peak in-flight request count to the group size. Cancellation is checked
//! before each station is issued and before each group starts.

use std::collections::HashSet;
use std::sync::Arc;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use log::{debug, warn};
use tokio_util::sync::CancellationToken;

use super::{validate_url, StreamValidator};
use crate::error_handling::{ErrorKind, ValidationError};
use crate::models::{
    BatchValidationResult, Station, StationValidationState, ValidationProgress, ValidationResult,
};

/// Running tally for one batch; `snapshot` derives [`ValidationProgress`].
struct ProgressTracker {
    total: usize,
    validated: usize,
    failed: usize,
    in_progress: usize,
}

impl ProgressTracker {
    fn new(total: usize) -> Self {
        ProgressTracker {
            total,
            validated: 0,
            failed: 0,
            in_progress: 0,
        }
    }

    fn snapshot(&self) -> ValidationProgress {
        ValidationProgress::new(self.total, self.validated, self.failed, self.in_progress)
    }
}

/// What one issued station produced by the time its future settled.
enum StationOutcome {
    Resolved(ValidationResult),
    Cancelled,
    /// The validation task itself died. Converted to Invalid so one
    /// station's fault never aborts its siblings or the batch.
    Faulted(String),
}

impl StreamValidator {
    /// Validates a batch of stations, pushing state transitions as they
    /// happen.
    ///
    /// `on_station` fires once per station when its checks start
    /// (`Validating`) and once when it reaches a terminal state.
    /// `on_progress` fires after every single transition with a
    /// monotonically non-decreasing completion count. Both are invoked
    /// serially from this call's own task, never concurrently.
    ///
    /// The returned result has `completed = false` iff the run was
    /// cancelled; stations that never resolved are listed in
    /// `pending_stations`.
    pub async fn validate_stations_streaming<F, P>(
        &self,
        stations: &[Station],
        mut on_station: F,
        mut on_progress: Option<P>,
    ) -> BatchValidationResult
    where
        F: FnMut(StationValidationState),
        P: FnMut(ValidationProgress),
    {
        let config = self.get_config();
        let token = self.fresh_cancel_token();
        let batch_size = config.batch_size.max(1);

        let mut tracker = ProgressTracker::new(stations.len());
        let mut valid_stations: Vec<String> = Vec::new();
        let mut invalid_stations: Vec<String> = Vec::new();

        debug!(
            "starting batch validation of {} stations (group size {batch_size})",
            stations.len()
        );

        'groups: for group in stations.chunks(batch_size) {
            if token.is_cancelled() {
                break;
            }

            let mut in_flight = FuturesUnordered::new();

            for station in group {
                if token.is_cancelled() {
                    break;
                }

                let url = station.stream_url().to_string();
                let uuid = station.station_uuid.clone();

                tracker.in_progress += 1;
                on_station(StationValidationState::validating(&uuid));
                if let Some(cb) = on_progress.as_mut() {
                    cb(tracker.snapshot());
                }

                // Serve cache hits inline: the station still walks
                // Validating -> terminal, just without any I/O.
                if config.enable_cache {
                    if let Some(mut hit) = self.cache.get(&url) {
                        self.stats.increment_cache_hit();
                        hit.cached = true;
                        tracker.in_progress -= 1;
                        settle(
                            &uuid,
                            &hit,
                            &mut tracker,
                            &mut valid_stations,
                            &mut invalid_stations,
                        );
                        on_station(StationValidationState::resolved(&uuid, &hit));
                        if let Some(cb) = on_progress.as_mut() {
                            cb(tracker.snapshot());
                        }
                        continue;
                    }
                }

                in_flight.push(issue_station(
                    self.client.clone(),
                    uuid,
                    url,
                    config.clone(),
                    Arc::clone(&self.stats),
                    token.clone(),
                ));
            }

            // Wait for the whole group to settle, reporting each station
            // the instant its own future resolves.
            while let Some((uuid, outcome)) = in_flight.next().await {
                tracker.in_progress -= 1;
                let result = match outcome {
                    StationOutcome::Resolved(result) => {
                        self.record_result(&result, &config);
                        result
                    }
                    StationOutcome::Cancelled => continue,
                    StationOutcome::Faulted(message) => {
                        // Counted but never cached: the synthetic result
                        // has no real URL to key on.
                        warn!("validation task for station {uuid} failed: {message}");
                        self.stats.increment_error(ErrorKind::Network);
                        synthesized_failure(&uuid, message)
                    }
                };

                settle(
                    &uuid,
                    &result,
                    &mut tracker,
                    &mut valid_stations,
                    &mut invalid_stations,
                );
                on_station(StationValidationState::resolved(&uuid, &result));
                if let Some(cb) = on_progress.as_mut() {
                    cb(tracker.snapshot());
                }
            }

            if token.is_cancelled() {
                break 'groups;
            }
        }

        let resolved: HashSet<&str> = valid_stations
            .iter()
            .chain(invalid_stations.iter())
            .map(String::as_str)
            .collect();
        let pending_stations: Vec<String> = stations
            .iter()
            .filter(|s| !resolved.contains(s.station_uuid.as_str()))
            .map(|s| s.station_uuid.clone())
            .collect();

        let completed = pending_stations.is_empty();
        debug!(
            "batch validation finished: {} valid, {} invalid, {} pending, completed: {completed}",
            valid_stations.len(),
            invalid_stations.len(),
            pending_stations.len()
        );

        BatchValidationResult {
            valid_stations,
            invalid_stations,
            pending_stations,
            progress: tracker.snapshot(),
            completed,
        }
    }
}

/// Spawns one station's validation and maps every way it can end into a
/// [`StationOutcome`].
async fn issue_station(
    client: reqwest::Client,
    uuid: String,
    url: String,
    config: crate::config::ValidatorConfig,
    stats: Arc<crate::error_handling::ValidationStats>,
    token: CancellationToken,
) -> (String, StationOutcome) {
    let handle = tokio::spawn(async move {
        tokio::select! {
            _ = token.cancelled() => None,
            result = validate_url(client, url, config, stats) => Some(result),
        }
    });

    let outcome = match handle.await {
        Ok(Some(result)) => StationOutcome::Resolved(result),
        Ok(None) => StationOutcome::Cancelled,
        Err(join_error) => StationOutcome::Faulted(join_error.to_string()),
    };
    (uuid, outcome)
}

/// Books a terminal result into the tally and the uuid lists.
fn settle(
    uuid: &str,
    result: &ValidationResult,
    tracker: &mut ProgressTracker,
    valid_stations: &mut Vec<String>,
    invalid_stations: &mut Vec<String>,
) {
    if result.is_valid {
        tracker.validated += 1;
        valid_stations.push(uuid.to_string());
    } else {
        tracker.failed += 1;
        invalid_stations.push(uuid.to_string());
    }
}

fn synthesized_failure(uuid: &str, message: String) -> ValidationResult {
    ValidationResult {
        url: format!("station:{uuid}"),
        is_valid: false,
        error: Some(ValidationError::network(format!(
            "validation aborted unexpectedly: {message}"
        ))),
        response_time_ms: 0,
        last_checked: chrono::Utc::now(),
        cached: false,
    }
}
