//! Engine outputs
//!
//! Structured statistics returned by the engine. Field names are part of the
//! external JSON surface.

use serde::{Deserialize, Serialize};

/// Temperature extremes over a window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRange {
    pub min: f64,
    pub max: f64,
    /// max - min
    pub range: f64,
}

/// Calm-wind tally over a window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalmPeriods {
    /// Records with windspeed strictly below the threshold
    pub calm_periods: usize,
    /// Records in the window
    pub total_periods: usize,
    /// calm / total * 100
    pub calm_percentage: f64,
}

/// Every statistic for one window
///
/// A slot is `None` (serialized as `null`) when its statistic had no result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSummary {
    pub avg_temperature: Option<f64>,
    pub temp_range: Option<TemperatureRange>,
    pub rate_of_change: Option<f64>,
    pub delta_per_hour: Option<f64>,
    pub avg_windspeed: Option<f64>,
    pub peak_windspeed: Option<f64>,
    pub dominant_wind_direction: Option<f64>,
    pub wind_variability: Option<f64>,
    pub calm_periods: Option<CalmPeriods>,
    /// Records actually used after clamping
    pub data_points: usize,
}
