//! Mock sample source
//!
//! Deterministic samples for dry runs and tests without network access.

use std::f64::consts::TAU;
use std::sync::atomic::{AtomicU64, Ordering};

use contracts::NewSample;
use tracing::trace;

use crate::{Result, SampleSource};

/// Mock sample source configuration
#[derive(Debug, Clone)]
pub struct MockSampleConfig {
    /// Mean temperature (°C)
    pub base_temperature: f64,

    /// Daily temperature swing around the mean (°C)
    pub temperature_amplitude: f64,

    /// Lowest windspeed produced (km/h)
    pub base_windspeed: f64,

    /// Direction of the first sample (degrees)
    pub start_direction: f64,

    /// Direction change per sample (degrees)
    pub direction_drift: f64,

    /// Interval stamped on every sample (seconds)
    pub interval: i64,
}

impl Default for MockSampleConfig {
    fn default() -> Self {
        Self {
            base_temperature: 15.0,
            temperature_amplitude: 5.0,
            base_windspeed: 3.0,
            start_direction: 340.0,
            direction_drift: 7.5,
            interval: 3600,
        }
    }
}

/// Mock sample source
///
/// Sample `k` follows a 24-step temperature cycle, a windspeed sawtooth over
/// five steps, and a direction drifting by a fixed step and wrapping at 360.
#[derive(Debug)]
pub struct MockSampleSource {
    config: MockSampleConfig,
    produced: AtomicU64,
}

impl MockSampleSource {
    pub fn new(config: MockSampleConfig) -> Self {
        Self {
            config,
            produced: AtomicU64::new(0),
        }
    }

    /// Samples handed out so far
    pub fn produced(&self) -> u64 {
        self.produced.load(Ordering::Relaxed)
    }

    /// Sample at position `step` of the sequence
    pub fn sample_at(&self, step: u64) -> NewSample {
        let c = &self.config;
        let phase = (step % 24) as f64 / 24.0 * TAU;
        NewSample {
            temperature: c.base_temperature + c.temperature_amplitude * phase.sin(),
            windspeed: c.base_windspeed + (step % 5) as f64,
            winddirection: (c.start_direction + c.direction_drift * step as f64).rem_euclid(360.0),
            interval: c.interval,
        }
    }
}

impl Default for MockSampleSource {
    fn default() -> Self {
        Self::new(MockSampleConfig::default())
    }
}

impl SampleSource for MockSampleSource {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn fetch(&self) -> Result<NewSample> {
        let step = self.produced.fetch_add(1, Ordering::Relaxed);
        let sample = self.sample_at(step);
        trace!(step, ?sample, "mock sample produced");
        Ok(sample)
    }
}
