//! Media compatibility probe.
//!
//! Answers one question: would the local playback stack accept this
//! stream? The probe fetches a bounded prefix of the body and hands it to
//! the audio format detector; playlists (HLS/M3U/PLS) count as playable
//! when they reference at least one entry, since the player consumes those
//! directly.
//!
//! All media-path failures are non-retryable: whether a stream's format is
//! playable is a deterministic property of the stream, not a transient
//! condition.

use std::io::Cursor;
use std::time::Duration;

use log::debug;
use reqwest::header::CONTENT_TYPE;
use symphonia::core::codecs::CODEC_TYPE_NULL;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use super::CheckResult;
use crate::config::{MAX_PLAYLIST_BYTES, MEDIA_PROBE_MAX_BYTES};
use crate::error_handling::{categorize_reqwest_error, ValidationError};

/// Content types that identify an HLS/M3U playlist.
const PLAYLIST_CONTENT_TYPES: &[&str] = &[
    "application/vnd.apple.mpegurl",
    "application/x-mpegurl",
    "application/mpegurl",
    "audio/x-mpegurl",
    "audio/mpegurl",
    "audio/x-scpls",
];

/// Checks whether the playback stack can begin playing `url`.
///
/// The whole operation races `timeout`; on expiry the in-flight transfer
/// is dropped, which aborts the connection, so no background loading
/// continues past any exit path.
pub async fn check_media_compatibility(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
) -> CheckResult {
    match tokio::time::timeout(timeout, media_probe(client, url)).await {
        Err(_) => Err(ValidationError::timeout(timeout.as_millis() as u64).non_retryable()),
        Ok(result) => result,
    }
}

async fn media_probe(client: &reqwest::Client, url: &str) -> CheckResult {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|err| categorize_reqwest_error(&err).non_retryable())?;

    let status = response.status();
    if !status.is_success() {
        // The playback stack cannot see status codes; a failed load is a
        // network-class error from its point of view.
        return Err(ValidationError::network(format!(
            "stream endpoint answered HTTP {} during media load",
            status.as_u16()
        ))
        .non_retryable());
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| {
            v.split(';')
                .next()
                .unwrap_or_default()
                .trim()
                .to_ascii_lowercase()
        });

    let playlist_hinted =
        is_playlist_hint(content_type.as_deref(), url);
    let cap = if playlist_hinted {
        MAX_PLAYLIST_BYTES
    } else {
        MEDIA_PROBE_MAX_BYTES
    };

    let prefix = fetch_prefix(response, cap)
        .await
        .map_err(|err| categorize_reqwest_error(&err).non_retryable())?;

    if prefix.is_empty() {
        return Err(ValidationError::audio_compatibility("stream body is empty"));
    }

    if playlist_hinted || prefix.starts_with(b"#EXTM3U") {
        check_playlist(&prefix)
    } else {
        probe_audio(prefix, content_type.as_deref(), url)
    }
}

/// Reads body chunks until `cap` bytes or end of stream, then hangs up.
async fn fetch_prefix(
    mut response: reqwest::Response,
    cap: usize,
) -> Result<Vec<u8>, reqwest::Error> {
    let mut buf: Vec<u8> = Vec::with_capacity(cap.min(16 * 1024));
    while let Some(chunk) = response.chunk().await? {
        buf.extend_from_slice(&chunk);
        if buf.len() >= cap {
            buf.truncate(cap);
            break;
        }
    }
    Ok(buf)
}

fn is_playlist_hint(content_type: Option<&str>, url: &str) -> bool {
    if let Some(content_type) = content_type {
        if PLAYLIST_CONTENT_TYPES.contains(&content_type) {
            return true;
        }
    }
    let path = url::Url::parse(url)
        .map(|u| u.path().to_ascii_lowercase())
        .unwrap_or_default();
    path.ends_with(".m3u8") || path.ends_with(".m3u") || path.ends_with(".pls")
}

/// Accepts a playlist that references at least one entry.
///
/// Handles extended M3U (`#EXTM3U`), bare M3U (one URL per line), and PLS
/// (`[playlist]` with `FileN=` keys). Binary data that merely arrived with
/// a playlist content type is rejected.
fn check_playlist(bytes: &[u8]) -> CheckResult {
    let text = match std::str::from_utf8(bytes) {
        Ok(text) => text,
        Err(_) => {
            return Err(ValidationError::audio_compatibility(
                "playlist is not valid UTF-8",
            ));
        }
    };

    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());

    let has_entry = if text.trim_start().to_ascii_lowercase().starts_with("[playlist]") {
        lines.any(|line| {
            let lower = line.to_ascii_lowercase();
            lower.starts_with("file") && line.contains('=')
        })
    } else {
        lines.any(|line| !line.starts_with('#'))
    };

    if has_entry {
        Ok(())
    } else {
        Err(ValidationError::audio_compatibility(
            "playlist contains no stream entries",
        ))
    }
}

/// Runs the audio format detector over the fetched prefix.
fn probe_audio(bytes: Vec<u8>, content_type: Option<&str>, url: &str) -> CheckResult {
    let mut hint = Hint::new();
    if let Some(ext) = url_extension(url) {
        hint.with_extension(&ext);
    }
    if let Some(mime) = content_type {
        hint.mime_type(mime);
    }

    let mss = MediaSourceStream::new(Box::new(Cursor::new(bytes)), Default::default());
    match symphonia::default::get_probe().format(
        &hint,
        mss,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    ) {
        Ok(probed) => {
            let has_track = probed
                .format
                .tracks()
                .iter()
                .any(|t| t.codec_params.codec != CODEC_TYPE_NULL);
            if has_track {
                Ok(())
            } else {
                Err(ValidationError::audio_compatibility(
                    "no decodable audio track in stream",
                ))
            }
        }
        Err(err) => {
            debug!("format probe rejected {url}: {err}");
            Err(ValidationError::audio_compatibility(format!(
                "unsupported stream format: {err}"
            )))
        }
    }
}

fn url_extension(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let path = parsed.path();
    let (_, ext) = path.rsplit_once('.')?;
    if !ext.is_empty() && ext.len() <= 4 && ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some(ext.to_ascii_lowercase())
    } else {
        None
    }
}
