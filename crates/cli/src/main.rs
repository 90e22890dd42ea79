//! # Weather Stats CLI
//!
//! Command-line entry point.
//!
//! Provides:
//! - Config loading with flag and environment overrides
//! - Sample ingestion into the persisted log
//! - Statistics queries and the weather summary

mod cli;
mod commands;
mod error;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use contracts::ObservabilitySettings;
use tracing::info;

use cli::{Cli, Commands};
use commands::{load_config, run_ingest, run_query, run_records, run_summary, run_validate};
use error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {e:#}");
            let code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(code)
        }
    }
}

async fn run(cli: &Cli) -> Result<()> {
    // `validate` reports a broken config instead of failing on it
    if let Commands::Validate(args) = &cli.command {
        init_logging(&fallback_settings(cli))?;
        return run_validate(cli, args);
    }

    let config = load_config(cli)?;
    init_logging(&config.observability)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        store = %config.store.path.display(),
        "Weather Stats CLI starting"
    );

    match &cli.command {
        Commands::Ingest(args) => run_ingest(&config, args).await,
        Commands::Records(args) => run_records(&config, args).await,
        Commands::Query(args) => run_query(&config, args).await,
        Commands::Summary(args) => run_summary(&config, args).await,
        Commands::Validate(args) => run_validate(cli, args),
    }
}

/// Logging settings derived from flags alone
fn fallback_settings(cli: &Cli) -> ObservabilitySettings {
    let mut settings = ObservabilitySettings::default();
    if let Some(format) = cli.log_format {
        settings.log_format = format.into();
    }
    settings.log_level = if cli.quiet {
        "warn"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
    .to_string();
    settings
}

fn init_logging(settings: &ObservabilitySettings) -> Result<()> {
    observability::init_with_config(settings)
}
