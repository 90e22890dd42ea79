//! # Stats Engine
//!
//! Read-only statistics over a trailing window of the record log.
//!
//! Responsibilities:
//! - Window the log per call (first `period` records, clamped to the log length)
//! - Linear statistics: averages, extremes, rate of change, delta per hour
//! - Circular statistics: dominant wind direction, direction variability
//! - Calm-period counting and the combined weather summary
//!
//! ## Example
//!
//! ```ignore
//! use stats_engine::WeatherEngine;
//!
//! let engine = WeatherEngine::new(store, config.engine.clone(), Observer::current("engine"));
//! if let Some(avg) = engine.average_temperature(24).await {
//!     println!("{avg} °C");
//! }
//! ```

pub mod circular;
mod engine;
mod error;
pub mod linear;
mod running;
mod window;

pub use contracts::{CalmPeriods, EngineConfig, TemperatureRange, WeatherSummary};
pub use engine::{Operation, WeatherEngine};
pub use error::StatsError;
pub use running::RunningStats;
pub use window::Window;

/// Round for presentation; never yields negative zero
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor + 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_places() {
        assert_eq!(round_to(12.3456, 2), 12.35);
        assert_eq!(round_to(12.3456, 1), 12.3);
        assert_eq!(round_to(-0.004, 2), 0.0);
        assert!(round_to(-0.004, 2).is_sign_positive());
    }
}
