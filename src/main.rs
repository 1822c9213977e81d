//! Main application entry point (CLI binary).
//!
//! A thin wrapper around the `stream_status` library: parses arguments,
//! initializes the logger, validates the station list, and prints a
//! summary. All core functionality lives in the library crate.

use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use stream_status::app::{
    load_stations, print_validation_statistics, write_results, ProgressLogger,
};
use stream_status::initialization::init_logger_with;
use stream_status::{Cli, StationValidationState, StreamValidator, ValidationProgress};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;

    let stations = load_stations(&cli.file).await?;
    if stations.is_empty() {
        eprintln!("No usable stations in {}", cli.file.display());
        process::exit(1);
    }

    let validator = Arc::new(
        StreamValidator::with_config(cli.validator_config())
            .context("Failed to initialize validator")?,
    );

    // Ctrl-C cancels the batch; already-resolved stations keep their state.
    {
        let validator = Arc::clone(&validator);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Interrupt received, cancelling validation");
                validator.cancel_validation();
            }
        });
    }

    let started = std::time::Instant::now();
    let mut progress_logger = ProgressLogger::new();
    let mut terminal_states: Vec<StationValidationState> = Vec::new();

    let outcome = validator
        .validate_stations_streaming(
            &stations,
            |state| {
                if state.status.is_terminal() {
                    terminal_states.push(state);
                }
            },
            Some(|progress: ValidationProgress| progress_logger.update(progress)),
        )
        .await;

    print_validation_statistics(validator.stats());

    if let Some(output) = &cli.output {
        write_results(output, &terminal_states)?;
        info!("Wrote {} station states to {}", terminal_states.len(), output.display());
    }

    let elapsed = started.elapsed().as_secs_f64();
    if outcome.completed {
        println!(
            "✅ Validated {} station{} ({} playable, {} failed) in {:.1}s",
            stations.len(),
            if stations.len() == 1 { "" } else { "s" },
            outcome.valid_stations.len(),
            outcome.invalid_stations.len(),
            elapsed
        );
    } else {
        println!(
            "⚠️ Validation cancelled after {:.1}s: {} playable, {} failed, {} unresolved",
            elapsed,
            outcome.valid_stations.len(),
            outcome.invalid_stations.len(),
            outcome.pending_stations.len()
        );
    }

    if outcome.valid_stations.is_empty() {
        process::exit(1);
    }
    Ok(())
}
