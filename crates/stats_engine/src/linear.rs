//! Linear statistics: averages, extremes, temperature trends, calm counts.
//!
//! Pure functions over a `Window`; results are unrounded.

use contracts::{CalmPeriods, TemperatureRange};

use crate::{RunningStats, StatsError, Window};

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Arithmetic mean of temperature
pub fn average_temperature(window: &Window<'_>) -> Result<f64, StatsError> {
    RunningStats::from_iter(window.temperatures())
        .mean()
        .ok_or(StatsError::EmptyLog)
}

/// Temperature extremes and their spread
pub fn temperature_range(window: &Window<'_>) -> Result<TemperatureRange, StatsError> {
    let stats = RunningStats::from_iter(window.temperatures());
    match (stats.min(), stats.max()) {
        (Some(min), Some(max)) => Ok(TemperatureRange {
            min,
            max,
            range: max - min,
        }),
        _ => Err(StatsError::EmptyLog),
    }
}

/// Mean of per-step rates (°C/h)
///
/// Each step divides the temperature change by the later record's `interval`
/// converted to hours; timestamps are ignored.
pub fn rate_of_change(window: &Window<'_>) -> Result<f64, StatsError> {
    let records = window.records();
    if records.len() < 2 {
        return Err(StatsError::InsufficientRecords {
            required: 2,
            available: records.len(),
        });
    }

    let mut rates = RunningStats::new();
    for pair in records.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);
        if curr.interval <= 0 {
            return Err(StatsError::InvalidInterval {
                id: curr.id,
                interval: curr.interval,
            });
        }
        let hours = curr.interval as f64 / SECONDS_PER_HOUR;
        rates.push((curr.temperature - prev.temperature) / hours);
    }

    rates.mean().ok_or(StatsError::EmptyLog)
}

/// (last - first) temperature divided by the window length
///
/// Intermediate records are ignored; a one-record window yields 0.
pub fn delta_per_hour(window: &Window<'_>) -> Result<f64, StatsError> {
    if window.is_empty() {
        return Err(StatsError::EmptyLog);
    }
    let delta = window.last().temperature - window.first().temperature;
    Ok(delta / window.len() as f64)
}

/// Arithmetic mean of windspeed
pub fn average_windspeed(window: &Window<'_>) -> Result<f64, StatsError> {
    RunningStats::from_iter(window.windspeeds())
        .mean()
        .ok_or(StatsError::EmptyLog)
}

/// Highest windspeed
pub fn peak_windspeed(window: &Window<'_>) -> Result<f64, StatsError> {
    RunningStats::from_iter(window.windspeeds())
        .max()
        .ok_or(StatsError::EmptyLog)
}

/// Records with windspeed strictly below `threshold`
pub fn calm_periods(window: &Window<'_>, threshold: f64) -> Result<CalmPeriods, StatsError> {
    if threshold.is_nan() || threshold < 0.0 {
        return Err(StatsError::InvalidThreshold { threshold });
    }

    let total = window.len();
    if total == 0 {
        return Err(StatsError::EmptyLog);
    }
    let calm = window.windspeeds().filter(|&speed| speed < threshold).count();

    Ok(CalmPeriods {
        calm_periods: calm,
        total_periods: total,
        calm_percentage: calm as f64 / total as f64 * 100.0,
    })
}
