//! Progress logging for batch runs.

use std::time::Instant;

use log::info;

use crate::models::ValidationProgress;

/// Logs batch progress from the `on_progress` callback, throttled to
/// whole-percent changes so a large batch does not flood the log.
pub struct ProgressLogger {
    started: Instant,
    last_percent: Option<u8>,
}

impl ProgressLogger {
    /// Creates a logger anchored to the current instant.
    pub fn new() -> Self {
        ProgressLogger {
            started: Instant::now(),
            last_percent: None,
        }
    }

    /// Feed one progress snapshot; logs only when the percentage moved.
    pub fn update(&mut self, progress: ValidationProgress) {
        if self.last_percent == Some(progress.percent_complete) {
            return;
        }
        self.last_percent = Some(progress.percent_complete);

        let done = progress.validated + progress.failed;
        let elapsed = self.started.elapsed().as_secs_f64();
        let rate = if elapsed > 0.0 {
            done as f64 / elapsed
        } else {
            0.0
        };
        info!(
            "Validated {}/{} stations ({}%) - {} playable, {} failed, {} in flight (~{:.1}/sec)",
            done,
            progress.total,
            progress.percent_complete,
            progress.validated,
            progress.failed,
            progress.in_progress,
            rate
        );
    }
}

impl Default for ProgressLogger {
    fn default() -> Self {
        Self::new()
    }
}
