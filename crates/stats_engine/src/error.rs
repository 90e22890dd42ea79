//! Stats engine error types

use contracts::RecordId;
use thiserror::Error;

/// Why a statistic has no result
///
/// Never escapes the engine: operations log it and return `None`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    /// Period or hours not a positive integer
    #[error("period must be a positive integer, got {period}")]
    InvalidPeriod { period: i64 },

    /// Nothing stored yet
    #[error("no data available")]
    EmptyLog,

    /// Window too small for the statistic
    #[error("need at least {required} records, window has {available}")]
    InsufficientRecords { required: usize, available: usize },

    /// Rate of change cannot divide by this interval
    #[error("record {id} has non-positive interval {interval}s")]
    InvalidInterval { id: RecordId, interval: i64 },

    /// Calm threshold negative or not a number
    #[error("calm threshold must be a non-negative number, got {threshold}")]
    InvalidThreshold { threshold: f64 },

    /// Direction vectors cancel out, mean direction undefined
    #[error("wind directions cancel out, no dominant direction")]
    UndefinedDirection,

    /// Computation produced NaN or infinity
    #[error("result is not finite")]
    NonFinite,
}

/// Pass finite values through, reject the rest
pub(crate) fn finite(value: f64) -> Result<f64, StatsError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(StatsError::NonFinite)
    }
}
