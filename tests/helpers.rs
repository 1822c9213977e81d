// Shared test helpers: mock stream servers and validator construction.
//
// Used across the integration suites via `mod helpers;` to reduce
// duplication.

use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use stream_status::{Station, StreamValidator, ValidatorConfig};

/// Minimal valid mono 16-bit PCM WAV file, enough for the format probe to
/// recognize.
#[allow(dead_code)] // Used by other test files
pub fn wav_bytes() -> Vec<u8> {
    let sample_rate: u32 = 8_000;
    let data = vec![0u8; 3200];
    let byte_rate = sample_rate * 2;

    let mut buf = Vec::new();
    buf.extend_from_slice(b"RIFF");
    buf.extend_from_slice(&(36 + data.len() as u32).to_le_bytes());
    buf.extend_from_slice(b"WAVE");
    buf.extend_from_slice(b"fmt ");
    buf.extend_from_slice(&16u32.to_le_bytes());
    buf.extend_from_slice(&1u16.to_le_bytes());
    buf.extend_from_slice(&1u16.to_le_bytes());
    buf.extend_from_slice(&sample_rate.to_le_bytes());
    buf.extend_from_slice(&byte_rate.to_le_bytes());
    buf.extend_from_slice(&2u16.to_le_bytes());
    buf.extend_from_slice(&16u16.to_le_bytes());
    buf.extend_from_slice(b"data");
    buf.extend_from_slice(&(data.len() as u32).to_le_bytes());
    buf.extend_from_slice(&data);
    buf
}

/// Starts a mock server whose `/stream` endpoint serves playable WAV audio.
#[allow(dead_code)]
pub async fn mock_audio_server() -> MockServer {
    mock_audio_server_with_delay(Duration::ZERO).await
}

/// Same as [`mock_audio_server`], with a fixed response delay.
#[allow(dead_code)]
pub async fn mock_audio_server_with_delay(delay: Duration) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stream"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "audio/wav")
                .set_body_bytes(wav_bytes())
                .set_delay(delay),
        )
        .mount(&server)
        .await;
    server
}

/// Starts a mock server whose `/stream` endpoint answers with a bare
/// status code.
#[allow(dead_code)]
pub async fn mock_status_server(status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stream"))
        .respond_with(ResponseTemplate::new(status))
        .mount(&server)
        .await;
    server
}

/// A station pointing at `url`, with `uuid` as its directory identifier.
#[allow(dead_code)]
pub fn station(uuid: &str, url: impl Into<String>) -> Station {
    Station {
        station_uuid: uuid.to_string(),
        ..Station::from_url(url.into())
    }
}

/// A validator with test-friendly settings.
#[allow(dead_code)]
pub fn test_validator(timeout_ms: u64, batch_size: usize, enable_cache: bool) -> StreamValidator {
    StreamValidator::with_config(ValidatorConfig {
        timeout: Duration::from_millis(timeout_ms),
        batch_size,
        enable_cache,
        ..ValidatorConfig::default()
    })
    .expect("validator construction should not fail")
}

/// A URL on localhost that nothing listens on; connections are refused
/// immediately.
#[allow(dead_code)]
pub fn unreachable_url(path: &str) -> String {
    format!("http://127.0.0.1:1/{path}")
}
