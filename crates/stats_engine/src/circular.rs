//! Circular statistics for wind direction.
//!
//! Directions are angles, so 350° and 10° are 20° apart and average to 0°.
//! Arithmetic means over raw degrees are wrong here and are never used.

use crate::{round_to, RunningStats, StatsError, Window};

const FULL_TURN: f64 = 360.0;
const HALF_TURN: f64 = 180.0;

/// Resultant length below which directions are treated as cancelling out
const MIN_RESULTANT: f64 = 1e-9;

/// Circular mean in [0, 360)
///
/// Sums the sine and cosine components independently and takes `atan2`.
pub fn circular_mean(directions: impl IntoIterator<Item = f64>) -> Result<f64, StatsError> {
    let (mut sum_sin, mut sum_cos, mut count) = (0.0_f64, 0.0_f64, 0usize);
    for degrees in directions {
        let radians = degrees.to_radians();
        sum_sin += radians.sin();
        sum_cos += radians.cos();
        count += 1;
    }

    if count == 0 {
        return Err(StatsError::EmptyLog);
    }
    if sum_sin.hypot(sum_cos) / (count as f64) < MIN_RESULTANT {
        return Err(StatsError::UndefinedDirection);
    }

    let mean = sum_sin.atan2(sum_cos).to_degrees();
    Ok(if mean < 0.0 { mean + FULL_TURN } else { mean })
}

/// Signed shortest turn from `from` to `to`, in (-180, 180]
pub fn angular_difference(from: f64, to: f64) -> f64 {
    let diff = (to - from).rem_euclid(FULL_TURN);
    if diff > HALF_TURN {
        diff - FULL_TURN
    } else {
        diff
    }
}

/// Dominant direction of a window
pub fn dominant_direction(window: &Window<'_>) -> Result<f64, StatsError> {
    circular_mean(window.directions())
}

/// Population standard deviation of absolute turns between adjacent records
///
/// Windows with fewer than two records have no variability and yield 0.
pub fn direction_variability(window: &Window<'_>) -> f64 {
    let turns: RunningStats = window
        .records()
        .windows(2)
        .map(|pair| angular_difference(pair[0].winddirection, pair[1].winddirection).abs())
        .collect();

    if turns.count() < 2 {
        return 0.0;
    }
    turns.population_std_dev()
}

/// Round a direction to one decimal, keeping it inside [0, 360)
pub fn round_direction(degrees: f64) -> f64 {
    let rounded = round_to(degrees, 1);
    if rounded >= FULL_TURN {
        rounded - FULL_TURN
    } else {
        rounded
    }
}
