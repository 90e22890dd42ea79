//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Weather Stats - windowed weather statistics over a local sample log
#[derive(Parser, Debug)]
#[command(
    name = "weather-stats",
    author,
    version,
    about = "Weather sample log and windowed statistics",
    long_about = "Collects current-weather samples into an append-only JSON log and\n\
                  computes statistics over a trailing window of the log: temperature\n\
                  averages and trends, wind speed, dominant direction, calm periods."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "WEATHER_STATS_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format (overrides the config file)
    #[arg(long, value_enum, global = true, env = "WEATHER_STATS_LOG_FORMAT")]
    pub log_format: Option<LogFormat>,

    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, global = true, env = "WEATHER_STATS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the log file location from configuration
    #[arg(long, global = true, env = "WEATHER_STATS_STORE")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch current weather and append it to the log
    Ingest(IngestArgs),

    /// List stored records, oldest first
    Records(RecordsArgs),

    /// Compute one statistic over a trailing window
    Query(QueryArgs),

    /// Compute every statistic over one window
    Summary(SummaryArgs),

    /// Validate configuration file without running
    Validate(ValidateArgs),
}

/// Arguments for the `ingest` command
#[derive(Parser, Debug, Clone)]
pub struct IngestArgs {
    /// Use the deterministic mock source instead of Open-Meteo
    #[arg(long)]
    pub mock: bool,

    /// Number of samples to fetch and append
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub count: u32,
}

/// Arguments for the `records` command
#[derive(Parser, Debug, Clone)]
pub struct RecordsArgs {
    /// Print at most this many records
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub limit: Option<u64>,
}

/// Arguments for the `query` command
#[derive(Parser, Debug, Clone)]
pub struct QueryArgs {
    /// Statistic to compute
    #[arg(value_enum)]
    pub operation: QueryOperation,

    /// Window size in records (defaults from configuration)
    #[arg(long, allow_negative_numbers = true)]
    pub period: Option<i64>,

    /// Calm threshold in km/h (calm-periods only)
    #[arg(long, allow_negative_numbers = true)]
    pub threshold: Option<f64>,
}

/// Arguments for the `summary` command
#[derive(Parser, Debug, Clone)]
pub struct SummaryArgs {
    /// Window size in records (defaults from configuration)
    #[arg(long, allow_negative_numbers = true)]
    pub period: Option<i64>,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Statistic selectable from the command line
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryOperation {
    AverageTemperature,
    TemperatureRange,
    RateOfChange,
    Delta,
    AverageWindspeed,
    PeakWindspeed,
    DominantDirection,
    DirectionVariability,
    CalmPeriods,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for contracts::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}
