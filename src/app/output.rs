//! Result export.
//!
//! Writes final per-station states as JSON lines, one object per station,
//! for downstream tooling.

use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::StationValidationState;

/// Writes `states` to `path` as JSON lines.
pub fn write_results(path: &Path, states: &[StationValidationState]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    for state in states {
        serde_json::to_writer(&mut writer, state).context("Failed to serialize station state")?;
        writer.write_all(b"\n").context("Failed to write output")?;
    }

    writer.flush().context("Failed to flush output")?;
    Ok(())
}
