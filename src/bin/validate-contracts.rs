// Copyright (c) 2025 - Cowboy AI, Inc.
//! Contract Validator
//!
//! Validates the homelab contracts directory and prints a report.
//! Exits 0 when no errors were found, 1 otherwise.
//!
//! Environment:
//! - `CONTRACTS_DIR` (default `infra/contracts`)
//! - `CONTRACTS_REPORT_FORMAT` (`text` or `json`)
//! - `CONTRACTS_NODE_DOMAIN` (default `home.internal`)
//! - `RUST_LOG` for progress output

use anyhow::{Context, Result};
use homelab_contracts::{ContractError, ContractValidator, Report, ValidatorConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<bool> {
    let config = ValidatorConfig::from_env().context("Failed to load configuration")?;
    let validator = ContractValidator::new(config);

    // A missing contracts directory stops the run before any stage
    let outcome = match validator.validate_all() {
        Ok(outcome) => outcome,
        Err(err @ ContractError::ContractsDirNotFound(_)) => return Err(err.into()),
        Err(err) => return Err(err).context("Validation did not run"),
    };

    let config = validator.config();
    let report = Report::new(&config.contracts_dir, &outcome.diagnostics);
    let rendered = report
        .render(config.format)
        .context("Failed to render report")?;
    println!("{rendered}");

    Ok(outcome.is_success())
}
