//! Main weather engine implementation.

use std::fmt;
use std::sync::Arc;

use contracts::{CalmPeriods, EngineConfig, RecordStore, TemperatureRange, WeatherSummary};
use observability::{record_query, Observer, QueryStatus};
use tracing::{debug, warn};

use crate::error::finite;
use crate::{circular, linear, round_to, StatsError, Window};

/// Statistics exposed by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    AverageTemperature,
    TemperatureRange,
    RateOfChange,
    DeltaPerHour,
    AverageWindspeed,
    PeakWindspeed,
    DominantWindDirection,
    WindDirectionVariability,
    CalmPeriods,
    WeatherSummary,
}

impl Operation {
    /// Stable name used in logs and metrics
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AverageTemperature => "average_temperature",
            Self::TemperatureRange => "temperature_range",
            Self::RateOfChange => "rate_of_change",
            Self::DeltaPerHour => "delta_per_hour",
            Self::AverageWindspeed => "average_windspeed",
            Self::PeakWindspeed => "peak_windspeed",
            Self::DominantWindDirection => "dominant_wind_direction",
            Self::WindDirectionVariability => "wind_direction_variability",
            Self::CalmPeriods => "calm_periods",
            Self::WeatherSummary => "weather_summary",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stateless statistics over the store's log
///
/// Every operation re-reads the full log, windows it, computes, and discards
/// the window. Failures are logged and reported as `None`.
#[derive(Debug)]
pub struct WeatherEngine<S> {
    store: Arc<S>,
    config: EngineConfig,
    observer: Observer,
}

impl<S: RecordStore> WeatherEngine<S> {
    pub fn new(store: Arc<S>, config: EngineConfig, observer: Observer) -> Self {
        Self {
            store,
            config,
            observer,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Mean temperature (°C, 2 decimals)
    pub async fn average_temperature(&self, period: i64) -> Option<f64> {
        self.run(Operation::AverageTemperature, period, average_temperature)
            .await
    }

    /// Min, max and spread of temperature (°C, 2 decimals)
    pub async fn temperature_range(&self, period: i64) -> Option<TemperatureRange> {
        self.run(Operation::TemperatureRange, period, temperature_range)
            .await
    }

    /// Mean per-step temperature rate (°C/h, 2 decimals)
    pub async fn rate_of_change(&self, hours: i64) -> Option<f64> {
        self.run(Operation::RateOfChange, hours, rate_of_change).await
    }

    /// First-to-last temperature change over the clamped hours (°C/h, 2 decimals)
    pub async fn delta_per_hour(&self, hours: i64) -> Option<f64> {
        self.run(Operation::DeltaPerHour, hours, delta_per_hour).await
    }

    /// Mean windspeed (km/h, 2 decimals)
    pub async fn average_windspeed(&self, period: i64) -> Option<f64> {
        self.run(Operation::AverageWindspeed, period, average_windspeed)
            .await
    }

    /// Highest windspeed (km/h, 2 decimals)
    pub async fn peak_windspeed(&self, period: i64) -> Option<f64> {
        self.run(Operation::PeakWindspeed, period, peak_windspeed)
            .await
    }

    /// Circular mean direction (degrees in [0, 360), 1 decimal)
    pub async fn dominant_wind_direction(&self, period: i64) -> Option<f64> {
        self.run(
            Operation::DominantWindDirection,
            period,
            dominant_wind_direction,
        )
        .await
    }

    /// Spread of turns between adjacent records (degrees, 2 decimals)
    pub async fn wind_direction_variability(&self, period: i64) -> Option<f64> {
        self.run(
            Operation::WindDirectionVariability,
            period,
            wind_direction_variability,
        )
        .await
    }

    /// Records with windspeed strictly below `threshold`
    pub async fn calm_periods(&self, period: i64, threshold: f64) -> Option<CalmPeriods> {
        self.run(Operation::CalmPeriods, period, |window| {
            calm_periods(window, threshold)
        })
        .await
    }

    /// Every statistic for one window, from a single read of the log
    ///
    /// Slots whose statistic has no result are `None`; the summary itself only
    /// fails for an invalid period or an empty log.
    pub async fn weather_summary(&self, period: i64) -> Option<WeatherSummary> {
        let op = Operation::WeatherSummary;
        let log = self.store.read_all().await;

        let window = match Window::clamp(&log, period) {
            Ok(window) => window,
            Err(e) => return self.finish(op, period, log.len(), Err(e)),
        };
        self.note_clamp(op, &window, log.len());

        let threshold = self.config.calm_threshold;
        let summary = WeatherSummary {
            avg_temperature: self.slot(Operation::AverageTemperature, &window, average_temperature),
            temp_range: self.slot(Operation::TemperatureRange, &window, temperature_range),
            rate_of_change: self.slot(Operation::RateOfChange, &window, rate_of_change),
            delta_per_hour: self.slot(Operation::DeltaPerHour, &window, delta_per_hour),
            avg_windspeed: self.slot(Operation::AverageWindspeed, &window, average_windspeed),
            peak_windspeed: self.slot(Operation::PeakWindspeed, &window, peak_windspeed),
            dominant_wind_direction: self.slot(
                Operation::DominantWindDirection,
                &window,
                dominant_wind_direction,
            ),
            wind_variability: self.slot(
                Operation::WindDirectionVariability,
                &window,
                wind_direction_variability,
            ),
            calm_periods: self.slot(Operation::CalmPeriods, &window, |w| {
                calm_periods(w, threshold)
            }),
            data_points: window.len(),
        };

        self.finish(op, period, log.len(), Ok(summary))
    }

    async fn run<T>(
        &self,
        op: Operation,
        period: i64,
        compute: impl FnOnce(&Window<'_>) -> Result<T, StatsError>,
    ) -> Option<T> {
        let log = self.store.read_all().await;
        let outcome = Window::clamp(&log, period).and_then(|window| {
            self.note_clamp(op, &window, log.len());
            compute(&window)
        });
        self.finish(op, period, log.len(), outcome)
    }

    fn slot<T>(
        &self,
        op: Operation,
        window: &Window<'_>,
        compute: impl FnOnce(&Window<'_>) -> Result<T, StatsError>,
    ) -> Option<T> {
        let available = window.records().len();
        self.finish(op, window.requested(), available, compute(window))
    }

    fn finish<T>(
        &self,
        op: Operation,
        period: i64,
        available: usize,
        outcome: Result<T, StatsError>,
    ) -> Option<T> {
        match outcome {
            Ok(value) => {
                record_query(op.as_str(), QueryStatus::Ok);
                Some(value)
            }
            Err(reason) => {
                record_query(op.as_str(), QueryStatus::NoResult);
                self.observer.in_scope(|| {
                    warn!(
                        component = self.observer.component(),
                        operation = op.as_str(),
                        period,
                        available,
                        reason = %reason,
                        "No result"
                    );
                });
                None
            }
        }
    }

    fn note_clamp(&self, op: Operation, window: &Window<'_>, available: usize) {
        if window.is_clamped() {
            self.observer.in_scope(|| {
                debug!(
                    component = self.observer.component(),
                    operation = op.as_str(),
                    requested = window.requested(),
                    available,
                    "Period exceeds history, using all available records"
                );
            });
        }
    }
}

fn average_temperature(window: &Window<'_>) -> Result<f64, StatsError> {
    linear::average_temperature(window)
        .and_then(finite)
        .map(|v| round_to(v, 2))
}

fn temperature_range(window: &Window<'_>) -> Result<TemperatureRange, StatsError> {
    let range = linear::temperature_range(window)?;
    Ok(TemperatureRange {
        min: round_to(finite(range.min)?, 2),
        max: round_to(finite(range.max)?, 2),
        range: round_to(finite(range.range)?, 2),
    })
}

fn rate_of_change(window: &Window<'_>) -> Result<f64, StatsError> {
    linear::rate_of_change(window)
        .and_then(finite)
        .map(|v| round_to(v, 2))
}

fn delta_per_hour(window: &Window<'_>) -> Result<f64, StatsError> {
    linear::delta_per_hour(window)
        .and_then(finite)
        .map(|v| round_to(v, 2))
}

fn average_windspeed(window: &Window<'_>) -> Result<f64, StatsError> {
    linear::average_windspeed(window)
        .and_then(finite)
        .map(|v| round_to(v, 2))
}

fn peak_windspeed(window: &Window<'_>) -> Result<f64, StatsError> {
    linear::peak_windspeed(window)
        .and_then(finite)
        .map(|v| round_to(v, 2))
}

fn dominant_wind_direction(window: &Window<'_>) -> Result<f64, StatsError> {
    circular::dominant_direction(window)
        .and_then(finite)
        .map(circular::round_direction)
}

fn wind_direction_variability(window: &Window<'_>) -> Result<f64, StatsError> {
    finite(circular::direction_variability(window)).map(|v| round_to(v, 2))
}

fn calm_periods(window: &Window<'_>, threshold: f64) -> Result<CalmPeriods, StatsError> {
    let calm = linear::calm_periods(window, threshold)?;
    Ok(CalmPeriods {
        calm_percentage: round_to(calm.calm_percentage, 2),
        ..calm
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::NewSample;
    use observability::EventCapture;
    use store::MemoryStore;
    use tracing::Level;

    async fn engine_with(rows: &[(f64, f64, f64, i64)]) -> WeatherEngine<MemoryStore> {
        let store = MemoryStore::new(Observer::silent("store"));
        for &(temperature, windspeed, winddirection, interval) in rows {
            store
                .append(NewSample {
                    temperature,
                    windspeed,
                    winddirection,
                    interval,
                })
                .await
                .unwrap();
        }
        WeatherEngine::new(
            Arc::new(store),
            EngineConfig::default(),
            Observer::silent("engine"),
        )
    }

    fn five_hours() -> Vec<(f64, f64, f64, i64)> {
        vec![
            (10.0, 2.0, 350.0, 3600),
            (12.0, 6.0, 10.0, 3600),
            (14.0, 4.0, 30.0, 3600),
            (13.0, 5.0, 90.0, 3600),
            (11.0, 8.0, 90.0, 3600),
        ]
    }

    #[tokio::test]
    async fn test_summary_of_known_log() {
        let engine = engine_with(&five_hours()).await;

        let summary = engine.weather_summary(5).await.unwrap();

        assert_eq!(summary.avg_temperature, Some(12.0));
        assert_eq!(
            summary.temp_range,
            Some(TemperatureRange {
                min: 10.0,
                max: 14.0,
                range: 4.0
            })
        );
        assert_eq!(summary.delta_per_hour, Some(0.2));
        // steps: +2, +2, -1, -2 per hour
        assert_eq!(summary.rate_of_change, Some(0.25));
        assert_eq!(summary.avg_windspeed, Some(5.0));
        assert_eq!(summary.peak_windspeed, Some(8.0));
        assert_eq!(summary.data_points, 5);
        let calm = summary.calm_periods.unwrap();
        assert_eq!((calm.calm_periods, calm.total_periods), (2, 5));
        assert_eq!(calm.calm_percentage, 40.0);
    }

    #[tokio::test]
    async fn test_summary_absent_slot_on_single_record() {
        let engine = engine_with(&[(9.0, 1.0, 200.0, 3600)]).await;

        let summary = engine.weather_summary(24).await.unwrap();

        assert_eq!(summary.rate_of_change, None);
        assert_eq!(summary.delta_per_hour, Some(0.0));
        assert_eq!(summary.wind_variability, Some(0.0));
        assert_eq!(summary.dominant_wind_direction, Some(200.0));
        assert_eq!(summary.data_points, 1);
    }

    #[tokio::test]
    async fn test_summary_on_empty_log_is_no_result() {
        let engine = engine_with(&[]).await;
        assert!(engine.weather_summary(5).await.is_none());
    }

    #[tokio::test]
    async fn test_every_operation_rejects_non_positive_period() {
        let engine = engine_with(&five_hours()).await;

        for period in [0, -1, -24] {
            assert!(engine.average_temperature(period).await.is_none());
            assert!(engine.temperature_range(period).await.is_none());
            assert!(engine.rate_of_change(period).await.is_none());
            assert!(engine.delta_per_hour(period).await.is_none());
            assert!(engine.average_windspeed(period).await.is_none());
            assert!(engine.peak_windspeed(period).await.is_none());
            assert!(engine.dominant_wind_direction(period).await.is_none());
            assert!(engine.wind_direction_variability(period).await.is_none());
            assert!(engine.calm_periods(period, 5.0).await.is_none());
            assert!(engine.weather_summary(period).await.is_none());
        }
    }

    #[tokio::test]
    async fn test_empty_log_is_no_result() {
        let engine = engine_with(&[]).await;
        assert!(engine.average_temperature(3).await.is_none());
        assert!(engine.peak_windspeed(3).await.is_none());
        assert!(engine.wind_direction_variability(3).await.is_none());
    }

    #[tokio::test]
    async fn test_period_is_clamped_to_history() {
        let engine = engine_with(&five_hours()).await;
        assert_eq!(
            engine.average_temperature(500).await,
            engine.average_temperature(5).await
        );
        assert_eq!(engine.delta_per_hour(500).await, Some(0.2));
    }

    #[tokio::test]
    async fn test_clamp_is_logged_with_component() {
        let store = MemoryStore::new(Observer::silent("store"));
        for temperature in [3.0, 5.0] {
            store
                .append(NewSample {
                    temperature,
                    windspeed: 2.0,
                    winddirection: 90.0,
                    interval: 3600,
                })
                .await
                .unwrap();
        }
        let capture = EventCapture::new();
        let engine = WeatherEngine::new(
            Arc::new(store),
            EngineConfig::default(),
            Observer::with_dispatch("engine", capture.dispatch()),
        );

        assert_eq!(engine.average_temperature(24).await, Some(4.0));

        let events = capture.events();
        let clamp = events
            .iter()
            .find(|e| e.level == Level::DEBUG)
            .expect("clamp logged");
        assert_eq!(clamp.field("component"), Some("engine"));
        assert_eq!(clamp.field("operation"), Some("average_temperature"));
        assert_eq!(clamp.field("requested"), Some("24"));
        assert_eq!(clamp.field("available"), Some("2"));
    }

    #[tokio::test]
    async fn test_direction_statistics() {
        let engine = engine_with(&five_hours()).await;

        let dominant = engine.dominant_wind_direction(2).await.unwrap();
        assert!(dominant.abs() < 0.1, "got {dominant}");

        // turns 20, 20, 60
        assert_eq!(engine.wind_direction_variability(4).await, Some(18.86));
    }

    #[tokio::test]
    async fn test_calm_periods_strict_threshold() {
        let engine = engine_with(&five_hours()).await;
        let calm = engine.calm_periods(4, 5.0).await.unwrap();
        assert_eq!(
            calm,
            CalmPeriods {
                calm_periods: 2,
                total_periods: 4,
                calm_percentage: 50.0
            }
        );
    }

    #[tokio::test]
    async fn test_no_result_is_logged_with_context() {
        let store = MemoryStore::new(Observer::silent("store"));
        store
            .append(NewSample {
                temperature: 1.0,
                windspeed: 1.0,
                winddirection: 1.0,
                interval: 3600,
            })
            .await
            .unwrap();
        let capture = EventCapture::new();
        let engine = WeatherEngine::new(
            Arc::new(store),
            EngineConfig::default(),
            Observer::with_dispatch("engine", capture.dispatch()),
        );

        assert!(engine.rate_of_change(10).await.is_none());

        let events = capture.events();
        let warning = events
            .iter()
            .find(|e| e.level == Level::WARN)
            .expect("warning logged");
        assert_eq!(warning.field("operation"), Some("rate_of_change"));
        assert_eq!(warning.field("period"), Some("10"));
        assert_eq!(warning.field("available"), Some("1"));
        assert!(warning.field("reason").unwrap().contains("at least 2"));
    }

    #[tokio::test]
    async fn test_zero_interval_is_no_result() {
        let engine = engine_with(&[(1.0, 1.0, 1.0, 3600), (2.0, 1.0, 1.0, 0)]).await;
        assert!(engine.rate_of_change(2).await.is_none());
        assert_eq!(engine.delta_per_hour(2).await, Some(0.5));
    }

    fn random_rows(seed: u64, n: usize) -> Vec<(f64, f64, f64, i64)> {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(seed);
        (0..n)
            .map(|_| {
                (
                    rng.random_range(-20.0..40.0),
                    rng.random_range(0.0..60.0),
                    rng.random_range(0.0..360.0),
                    rng.random_range(600..7200),
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn test_clamping_is_idempotent_on_random_logs() {
        for seed in 0..8 {
            let rows = random_rows(seed, 3 + seed as usize);
            let len = rows.len() as i64;
            let engine = engine_with(&rows).await;

            for over in [len + 1, len * 3, i64::MAX] {
                assert_eq!(
                    engine.weather_summary(over).await,
                    engine.weather_summary(len).await,
                    "seed {seed}, period {over}"
                );
                assert_eq!(
                    engine.calm_periods(over, 10.0).await,
                    engine.calm_periods(len, 10.0).await
                );
            }
        }
    }

    #[tokio::test]
    async fn test_delta_per_hour_negates_with_temperatures() {
        for seed in 100..106 {
            let rows = random_rows(seed, 6);
            let negated: Vec<_> = rows.iter().map(|&(t, w, d, i)| (-t, w, d, i)).collect();

            let forward = engine_with(&rows).await;
            let backward = engine_with(&negated).await;

            for hours in 1..=6 {
                let a = forward.delta_per_hour(hours).await.unwrap();
                let b = backward.delta_per_hour(hours).await.unwrap();
                assert_eq!(a, -b + 0.0, "seed {seed}, hours {hours}");
            }
        }
    }

    #[tokio::test]
    async fn test_identical_directions_have_zero_variability() {
        let rows: Vec<_> = (0..6).map(|i| (i as f64, 3.0, 123.0, 3600)).collect();
        let engine = engine_with(&rows).await;
        assert_eq!(engine.wind_direction_variability(6).await, Some(0.0));
    }

    #[test]
    fn test_operation_names() {
        assert_eq!(Operation::CalmPeriods.to_string(), "calm_periods");
        assert_eq!(
            Operation::WindDirectionVariability.as_str(),
            "wind_direction_variability"
        );
    }
}
