//! Cancellation: mid-batch aborts must leave already-terminal stations
//! alone and report the unresolved remainder as pending.

mod helpers;

use helpers::{mock_audio_server_with_delay, station, test_validator};

use std::time::Duration;

use stream_status::{StationStatus, ValidationProgress};

#[tokio::test]
async fn cancel_mid_batch_leaves_remaining_stations_pending() {
    let server = mock_audio_server_with_delay(Duration::from_millis(100)).await;
    let url = format!("{}/stream", server.uri());

    // batch_size 2: group 1 is (s1, s2), group 2 is (s3, s4). Cancelling
    // once both group-1 stations have resolved must prevent group 2 from
    // ever being issued.
    let stations = vec![
        station("s1", url.clone()),
        station("s2", url.clone()),
        station("s3", url.clone()),
        station("s4", url.clone()),
    ];

    // Cache off so s2 does not short-circuit through s1's result.
    let validator = test_validator(5_000, 2, false);

    let mut terminal_count = 0usize;
    let outcome = validator
        .validate_stations_streaming(
            &stations,
            |state| {
                if state.status.is_terminal() {
                    terminal_count += 1;
                    if terminal_count == 2 {
                        validator.cancel_validation();
                    }
                }
            },
            None::<fn(ValidationProgress)>,
        )
        .await;

    assert!(!outcome.completed);
    assert_eq!(
        outcome.valid_stations.len() + outcome.invalid_stations.len(),
        2,
        "group 1 resolved before the cancel"
    );
    let mut pending = outcome.pending_stations.clone();
    pending.sort();
    assert_eq!(pending, vec!["s3".to_string(), "s4".to_string()]);
    assert!(outcome.progress.percent_complete < 100);
}

#[tokio::test]
async fn cancel_before_any_station_resolves_pends_everything() {
    let server = mock_audio_server_with_delay(Duration::from_millis(500)).await;
    let url = format!("{}/stream", server.uri());

    let stations = vec![station("s1", url.clone()), station("s2", url)];
    let validator = test_validator(5_000, 2, false);

    let mut saw_validating = false;
    let outcome = validator
        .validate_stations_streaming(
            &stations,
            |state| {
                if state.status == StationStatus::Validating && !saw_validating {
                    saw_validating = true;
                    validator.cancel_validation();
                }
            },
            None::<fn(ValidationProgress)>,
        )
        .await;

    assert!(saw_validating);
    assert!(!outcome.completed);
    assert!(outcome.valid_stations.is_empty());
    assert!(outcome.invalid_stations.is_empty());
    assert_eq!(outcome.pending_stations.len(), 2);
}

#[tokio::test]
async fn cancel_with_no_batch_in_flight_is_a_noop() {
    let validator = test_validator(1_000, 2, true);

    // Idempotent and harmless while idle.
    validator.cancel_validation();
    validator.cancel_validation();

    // A batch started afterwards runs normally on a fresh token.
    let server = mock_audio_server_with_delay(Duration::ZERO).await;
    let stations = vec![station("s1", format!("{}/stream", server.uri()))];

    let outcome = validator
        .validate_stations_streaming(&stations, |_| {}, None::<fn(ValidationProgress)>)
        .await;

    assert!(outcome.completed);
    assert_eq!(outcome.valid_stations, vec!["s1".to_string()]);
}
