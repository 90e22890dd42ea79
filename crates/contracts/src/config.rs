//! AppConfig - Config Loader output
//!
//! Describes the full deployment: log location, engine defaults, sample source
//! and logging setup. Every section and field has a default.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::RecordClock;

/// Config version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Config version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Persisted log settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Statistics defaults
    #[serde(default)]
    pub engine: EngineConfig,

    /// Remote sample source
    #[serde(default)]
    pub source: SourceConfig,

    /// Logging and metrics
    #[serde(default)]
    pub observability: ObservabilitySettings,
}

/// Persisted log settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Location of the JSON log
    #[serde(default = "default_store_path")]
    pub path: PathBuf,

    /// Clock used to stamp timestamps
    #[serde(default)]
    pub clock: RecordClock,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            clock: RecordClock::default(),
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from("data/weather_log.json")
}

/// Default calm threshold (km/h)
pub const DEFAULT_CALM_THRESHOLD: f64 = 5.0;

/// Statistics defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Windspeed below which a record counts as calm (km/h)
    #[serde(default = "default_calm_threshold")]
    pub calm_threshold: f64,

    /// Window used when a period query omits the period
    #[serde(default = "default_period")]
    pub default_period: i64,

    /// Window used when a rate/delta query omits the hours
    #[serde(default = "default_hours")]
    pub default_hours: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            calm_threshold: DEFAULT_CALM_THRESHOLD,
            default_period: default_period(),
            default_hours: default_hours(),
        }
    }
}

fn default_calm_threshold() -> f64 {
    DEFAULT_CALM_THRESHOLD
}

fn default_period() -> i64 {
    24
}

fn default_hours() -> i64 {
    10
}

/// Open-Meteo source settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Latitude (degrees)
    #[serde(default = "default_latitude")]
    pub latitude: f64,

    /// Longitude (degrees)
    #[serde(default = "default_longitude")]
    pub longitude: f64,

    /// Forecast endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            latitude: default_latitude(),
            longitude: default_longitude(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_latitude() -> f64 {
    35.685017
}

fn default_longitude() -> f64 {
    51.389693
}

fn default_base_url() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

/// Logging and metrics settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilitySettings {
    /// Log format
    #[serde(default)]
    pub log_format: LogFormat,

    /// Default log level, overridden by RUST_LOG
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Prometheus port (None = disabled)
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

impl Default for ObservabilitySettings {
    fn default() -> Self {
        Self {
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            metrics_port: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
