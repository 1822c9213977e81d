//! Station list input parsing.
//!
//! The CLI accepts either a radio-browser-style JSON export (an array of
//! station objects) or a line-oriented file with one stream URL per line,
//! `#` comments allowed. `-` reads from stdin.

use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};
use tokio::io::AsyncReadExt;

use super::url::validate_and_normalize_url;
use crate::models::Station;

/// Loads stations from `path`, or from stdin when `path` is `-`.
pub async fn load_stations(path: &Path) -> Result<Vec<Station>> {
    let content = if path.as_os_str() == "-" {
        info!("Reading stations from stdin");
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .context("Failed to read stations from stdin")?;
        buf
    } else {
        tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read station file {}", path.display()))?
    };

    let stations = parse_stations(&content)?;
    info!("Loaded {} stations", stations.len());
    Ok(stations)
}

/// Parses station input, auto-detecting JSON versus a plain URL list.
pub fn parse_stations(content: &str) -> Result<Vec<Station>> {
    let trimmed = content.trim_start();
    if trimmed.starts_with('[') {
        let stations: Vec<Station> =
            serde_json::from_str(trimmed).context("Failed to parse station JSON export")?;
        return Ok(stations);
    }
    if trimmed.starts_with('{') {
        let station: Station =
            serde_json::from_str(trimmed).context("Failed to parse station JSON object")?;
        return Ok(vec![station]);
    }

    let mut stations = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match validate_and_normalize_url(line) {
            Some(url) => stations.push(Station::from_url(url)),
            None => warn!("Ignoring unusable input line: {line}"),
        }
    }
    Ok(stations)
}
