//! `query` command implementation.

use anyhow::Result;
use config_loader::AppConfig;
use contracts::RecordStore;
use serde_json::{json, Value};
use stats_engine::WeatherEngine;
use tracing::info;

use super::{open_engine, print_json};
use crate::cli::{QueryArgs, QueryOperation};
use crate::error::CliError;

/// Execute the `query` command
pub async fn run_query(config: &AppConfig, args: &QueryArgs) -> Result<()> {
    let engine = open_engine(config).await?;

    let period = args.period.unwrap_or_else(|| default_window(&engine, args.operation));
    let threshold = args.threshold.unwrap_or(engine.config().calm_threshold);
    info!(operation = ?args.operation, period, "Running query");

    match query(&engine, args.operation, period, threshold).await {
        Some(output) => print_json(&output),
        None => Err(CliError::not_found(not_found_message(args.operation)).into()),
    }
}

/// Configured window for an operation
fn default_window<S>(engine: &WeatherEngine<S>, operation: QueryOperation) -> i64
where
    S: RecordStore,
{
    match operation {
        QueryOperation::RateOfChange | QueryOperation::Delta => engine.config().default_hours,
        _ => engine.config().default_period,
    }
}

/// Run one statistic and shape it for output
pub async fn query<S>(
    engine: &WeatherEngine<S>,
    operation: QueryOperation,
    period: i64,
    threshold: f64,
) -> Option<Value>
where
    S: RecordStore + Send + Sync,
{
    let output = match operation {
        QueryOperation::AverageTemperature => json!({
            "period": period,
            "average_temperature": engine.average_temperature(period).await?,
            "unit": "celsius",
        }),
        QueryOperation::TemperatureRange => json!({
            "period": period,
            "temperature_range": engine.temperature_range(period).await?,
            "unit": "celsius",
        }),
        QueryOperation::RateOfChange => json!({
            "hours": period,
            "avg_rate_of_change": engine.rate_of_change(period).await?,
            "unit": "celsius/hour",
        }),
        QueryOperation::Delta => json!({
            "hours": period,
            "delta_per_hour": engine.delta_per_hour(period).await?,
            "unit": "celsius/hour",
        }),
        QueryOperation::AverageWindspeed => json!({
            "period": period,
            "average_windspeed": engine.average_windspeed(period).await?,
            "unit": "km/h",
        }),
        QueryOperation::PeakWindspeed => json!({
            "period": period,
            "peak_windspeed": engine.peak_windspeed(period).await?,
            "unit": "km/h",
        }),
        QueryOperation::DominantDirection => json!({
            "period": period,
            "dominant_direction": engine.dominant_wind_direction(period).await?,
            "unit": "degrees",
        }),
        QueryOperation::DirectionVariability => json!({
            "period": period,
            "direction_variability": engine.wind_direction_variability(period).await?,
            "unit": "degrees_std_dev",
        }),
        QueryOperation::CalmPeriods => json!({
            "period": period,
            "threshold": threshold,
            "result": engine.calm_periods(period, threshold).await?,
            "unit": "km/h",
        }),
    };
    Some(output)
}

fn not_found_message(operation: QueryOperation) -> &'static str {
    match operation {
        QueryOperation::AverageTemperature => "Unable to calculate average",
        QueryOperation::TemperatureRange => "Unable to calculate range",
        QueryOperation::RateOfChange => "Unable to calculate rate of change",
        QueryOperation::Delta => "Unable to calculate delta",
        QueryOperation::AverageWindspeed => "Unable to calculate average windspeed",
        QueryOperation::PeakWindspeed => "Unable to calculate peak windspeed",
        QueryOperation::DominantDirection => "Unable to calculate dominant direction",
        QueryOperation::DirectionVariability => "Unable to calculate variability",
        QueryOperation::CalmPeriods => "Unable to calculate calm periods",
    }
}
