//! Configuration constants.
//!
//! Operational parameters for the validation engine: timeouts, cache TTLs,
//! batch sizing, and probe limits.

use std::time::Duration;

/// Default per-check timeout in milliseconds (applies to both checkers).
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Hard cap on the accessibility probe deadline.
/// The probe only needs response headers; anything slower than 3s is treated
/// as unreachable regardless of the configured timeout.
pub const ACCESSIBILITY_TIMEOUT_CAP_MS: u64 = 3_000;

/// Default number of stations validated concurrently per batch group.
/// Group N+1 is not issued until group N has fully settled, so this bounds
/// the peak number of in-flight requests against stream hosts.
pub const DEFAULT_BATCH_SIZE: usize = 5;

/// Success-path cache TTL: 24 hours.
/// A known-good station does not need frequent re-verification.
pub const DEFAULT_SUCCESS_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Failure-path cache TTL: 5 minutes, not configurable.
/// A station that is merely temporarily down should be retried soon.
pub const FAILURE_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Maximum number of leading stream bytes fetched for the media
/// compatibility probe. The playback stack decides playability from the
/// first bytes it buffers; an endless live stream must never pin the probe.
pub const MEDIA_PROBE_MAX_BYTES: usize = 64 * 1024;

/// Maximum playlist size inspected when a stream URL serves an HLS/M3U
/// playlist instead of raw audio.
pub const MAX_PLAYLIST_BYTES: usize = 256 * 1024;

/// Maximum URL length accepted from input files.
/// Matches common browser and server limits.
pub const MAX_URL_LENGTH: usize = 2048;

/// `Accept` header sent by the accessibility probe.
pub const ACCESSIBILITY_ACCEPT_HEADER: &str = "audio/*";

/// User-Agent for all outbound probes.
pub const USER_AGENT: &str = concat!("stream_status/", env!("CARGO_PKG_VERSION"));
