//! `summary` command implementation.

use anyhow::Result;
use config_loader::AppConfig;
use serde_json::json;
use tracing::info;

use super::{open_engine, print_json};
use crate::cli::SummaryArgs;
use crate::error::CliError;

/// Execute the `summary` command
pub async fn run_summary(config: &AppConfig, args: &SummaryArgs) -> Result<()> {
    let engine = open_engine(config).await?;
    let period = args.period.unwrap_or(config.engine.default_period);

    info!(period, "Building weather summary");
    match engine.weather_summary(period).await {
        Some(summary) => print_json(&json!({ "period": period, "summary": summary })),
        None => Err(CliError::not_found("Unable to generate summary").into()),
    }
}
