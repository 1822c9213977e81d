//! Core data types: station records, validation results, and batch progress.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error_handling::ValidationError;

/// A radio station record as delivered by a station directory.
///
/// Only `station_uuid` and `url` are required; everything else is optional
/// directory metadata. Field names follow the radio-browser JSON export
/// (lowercase, no separators), e.g. `stationuuid`, `url_resolved`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    /// Stable identifier assigned by the directory.
    #[serde(rename = "stationuuid")]
    pub station_uuid: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Stream URL as registered in the directory.
    pub url: String,
    /// Redirect-resolved stream URL, when the directory provides one.
    /// Preferred over `url` for validation.
    #[serde(default)]
    pub url_resolved: Option<String>,
    /// Audio codec advertised by the directory (e.g. "MP3", "AAC").
    #[serde(default)]
    pub codec: Option<String>,
    /// Advertised bitrate in kbit/s.
    #[serde(default)]
    pub bitrate: Option<u32>,
    /// Station homepage.
    #[serde(default)]
    pub homepage: Option<String>,
    /// Favicon URL.
    #[serde(default)]
    pub favicon: Option<String>,
    /// ISO 3166-1 alpha-2 country code.
    #[serde(default, rename = "countrycode")]
    pub country_code: Option<String>,
    /// Comma-separated directory tags.
    #[serde(default)]
    pub tags: Option<String>,
}

impl Station {
    /// Creates a minimal station from a bare URL. The URL doubles as the
    /// uuid, which is what the CLI does for line-oriented input files.
    pub fn from_url(url: impl Into<String>) -> Self {
        let url = url.into();
        Station {
            station_uuid: url.clone(),
            name: String::new(),
            url,
            url_resolved: None,
            codec: None,
            bitrate: None,
            homepage: None,
            favicon: None,
            country_code: None,
            tags: None,
        }
    }

    /// The URL validation should probe: the resolved URL when present and
    /// non-empty, otherwise the registered one.
    pub fn stream_url(&self) -> &str {
        match self.url_resolved.as_deref() {
            Some(resolved) if !resolved.is_empty() => resolved,
            _ => &self.url,
        }
    }
}

/// Outcome of validating one stream URL. Immutable once produced.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    /// The URL that was checked (exact string, not normalized).
    pub url: String,
    /// Whether the stream is considered playable.
    pub is_valid: bool,
    /// The failure, when `is_valid` is false. A valid result never carries
    /// an error.
    pub error: Option<ValidationError>,
    /// Wall-clock time the checks took, in milliseconds. A cache hit keeps
    /// the originally measured time.
    pub response_time_ms: u64,
    /// When the underlying checks actually ran.
    pub last_checked: DateTime<Utc>,
    /// True when this result was served from the cache.
    pub cached: bool,
}

/// Per-station status as shown to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StationStatus {
    /// Not yet touched by any validation run.
    Unknown,
    /// A batch run has started this station's checks.
    Validating,
    /// The stream is reachable and playable.
    Valid,
    /// The stream failed validation.
    Invalid,
}

impl StationStatus {
    /// Valid and Invalid are terminal within a single batch run.
    pub fn is_terminal(self) -> bool {
        matches!(self, StationStatus::Valid | StationStatus::Invalid)
    }
}

/// UI-facing projection of one station's validation lifecycle.
///
/// Emitted through the `on_station` callback: once when the station enters
/// `Validating`, and once more when it reaches a terminal state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationValidationState {
    /// Directory uuid of the station.
    pub station_uuid: String,
    /// Current lifecycle status.
    pub status: StationStatus,
    /// Failure detail, present only for `Invalid`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ValidationError>,
    /// Check duration, present for terminal states.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    /// When the checks ran, present for terminal states.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_checked: Option<DateTime<Utc>>,
}

impl StationValidationState {
    pub(crate) fn validating(station_uuid: &str) -> Self {
        StationValidationState {
            station_uuid: station_uuid.to_string(),
            status: StationStatus::Validating,
            error: None,
            response_time_ms: None,
            last_checked: None,
        }
    }

    pub(crate) fn resolved(station_uuid: &str, result: &ValidationResult) -> Self {
        StationValidationState {
            station_uuid: station_uuid.to_string(),
            status: if result.is_valid {
                StationStatus::Valid
            } else {
                StationStatus::Invalid
            },
            error: result.error.clone(),
            response_time_ms: Some(result.response_time_ms),
            last_checked: Some(result.last_checked),
        }
    }
}

/// Aggregate progress of an in-flight batch run.
///
/// Recomputed after every station transition; `validated + failed` and
/// `percent_complete` never decrease within one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationProgress {
    /// Number of stations in the run.
    pub total: usize,
    /// Stations that resolved Valid so far.
    pub validated: usize,
    /// Stations that resolved Invalid so far.
    pub failed: usize,
    /// Stations currently between Validating and a terminal state.
    pub in_progress: usize,
    /// `round(100 * (validated + failed) / total)`; 100 for an empty run.
    pub percent_complete: u8,
}

impl ValidationProgress {
    pub(crate) fn new(total: usize, validated: usize, failed: usize, in_progress: usize) -> Self {
        let percent_complete = if total == 0 {
            100
        } else {
            // Manual rounding keeps this integer-only.
            ((100 * (validated + failed) + total / 2) / total) as u8
        };
        ValidationProgress {
            total,
            validated,
            failed,
            in_progress,
            percent_complete,
        }
    }
}

/// Final outcome of a streaming batch validation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchValidationResult {
    /// Uuids of stations whose stream validated.
    pub valid_stations: Vec<String>,
    /// Uuids of stations whose stream failed validation.
    pub invalid_stations: Vec<String>,
    /// Uuids of stations that never reached a terminal state. Non-empty only
    /// when the run was cancelled.
    pub pending_stations: Vec<String>,
    /// Progress snapshot at the end of the run.
    pub progress: ValidationProgress,
    /// False iff the run was cancelled before every station resolved.
    pub completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_url_prefers_resolved() {
        let mut station = Station::from_url("http://radio.example/live");
        assert_eq!(station.stream_url(), "http://radio.example/live");

        station.url_resolved = Some("http://cdn.example/live".to_string());
        assert_eq!(station.stream_url(), "http://cdn.example/live");

        // An empty resolved URL must not shadow the original.
        station.url_resolved = Some(String::new());
        assert_eq!(station.stream_url(), "http://radio.example/live");
    }

    #[test]
    fn progress_percent_rounds() {
        assert_eq!(ValidationProgress::new(3, 1, 0, 1).percent_complete, 33);
        assert_eq!(ValidationProgress::new(3, 1, 1, 1).percent_complete, 67);
        assert_eq!(ValidationProgress::new(3, 2, 1, 0).percent_complete, 100);
    }

    #[test]
    fn progress_empty_run_is_complete() {
        assert_eq!(ValidationProgress::new(0, 0, 0, 0).percent_complete, 100);
    }

    #[test]
    fn station_parses_radio_browser_json() {
        let json = r#"{
            "stationuuid": "9617a958-0601-11e8-ae97-52543be04c81",
            "name": "SomaFM Groove Salad",
            "url": "http://ice2.somafm.com/groovesalad-128-mp3",
            "url_resolved": "http://ice2.somafm.com/groovesalad-128-mp3",
            "codec": "MP3",
            "bitrate": 128,
            "countrycode": "US",
            "tags": "ambient,chillout"
        }"#;
        let station: Station = serde_json::from_str(json).expect("station should parse");
        assert_eq!(station.name, "SomaFM Groove Salad");
        assert_eq!(station.bitrate, Some(128));
        assert_eq!(station.country_code.as_deref(), Some("US"));
    }
}
