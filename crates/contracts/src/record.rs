//! Record - Store output
//!
//! One stamped weather sample and the unstamped candidate handed to the store.

use std::fmt;

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ContractError;

/// Record identifier, assigned by the store
pub type RecordId = u64;

/// Stored weather sample
///
/// Immutable once appended. Unknown fields in the persisted log are ignored
/// here so logs written by other producers stay readable; the file store keeps
/// them on disk untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Monotonic id: 0 for the first record, then previous + 1
    pub id: RecordId,

    /// Creation time stamped by the store (ISO-8601)
    pub timestamp: RecordTimestamp,

    /// Air temperature (°C)
    pub temperature: f64,

    /// Wind speed (km/h)
    pub windspeed: f64,

    /// Wind direction (degrees, conventionally [0, 360))
    pub winddirection: f64,

    /// Sampling period preceding this record (seconds)
    pub interval: i64,
}

/// Candidate sample, lacking `id` and `timestamp`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewSample {
    pub temperature: f64,
    pub windspeed: f64,
    pub winddirection: f64,
    pub interval: i64,
}

impl NewSample {
    /// Reject values that would poison the log
    ///
    /// Wind direction is only required to be finite; its range is not checked.
    pub fn validate(&self) -> Result<(), ContractError> {
        for (field, value) in [
            ("temperature", self.temperature),
            ("windspeed", self.windspeed),
            ("winddirection", self.winddirection),
        ] {
            if !value.is_finite() {
                return Err(ContractError::invalid_sample(
                    field,
                    format!("must be finite, got {value}"),
                ));
            }
        }

        if self.windspeed < 0.0 {
            return Err(ContractError::invalid_sample(
                "windspeed",
                format!("must be >= 0, got {}", self.windspeed),
            ));
        }

        Ok(())
    }

    /// Stamp the sample with store-assigned identity
    pub fn into_record(self, id: RecordId, timestamp: NaiveDateTime) -> Record {
        Record {
            id,
            timestamp: RecordTimestamp::Naive(timestamp),
            temperature: self.temperature,
            windspeed: self.windspeed,
            winddirection: self.winddirection,
            interval: self.interval,
        }
    }
}

/// Record creation time as written in the log
///
/// The store stamps wall-clock time without an offset. Logs from other
/// deployments may carry one, e.g. `2024-11-05T13:04:05+00:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordTimestamp {
    Offset(DateTime<FixedOffset>),
    Naive(NaiveDateTime),
}

impl RecordTimestamp {
    /// Wall-clock time, dropping any offset
    pub fn naive(&self) -> NaiveDateTime {
        match self {
            Self::Offset(dt) => dt.naive_local(),
            Self::Naive(dt) => *dt,
        }
    }
}

impl From<NaiveDateTime> for RecordTimestamp {
    fn from(dt: NaiveDateTime) -> Self {
        Self::Naive(dt)
    }
}

impl fmt::Display for RecordTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Offset(dt) => write!(f, "{}", dt.to_rfc3339()),
            Self::Naive(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
        }
    }
}

/// Next id for a log: 0 when empty, otherwise last id + 1
pub fn next_record_id(log: &[Record]) -> Result<RecordId, ContractError> {
    match log.last() {
        None => Ok(0),
        Some(last) => last
            .id
            .checked_add(1)
            .ok_or(ContractError::IdExhausted { last: last.id }),
    }
}

/// Clock used to stamp record timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordClock {
    /// Host local time
    #[default]
    Local,
    /// Coordinated universal time
    Utc,
}

impl RecordClock {
    /// Current time on this clock, without offset
    pub fn now(&self) -> NaiveDateTime {
        match self {
            Self::Local => Local::now().naive_local(),
            Self::Utc => Utc::now().naive_utc(),
        }
    }
}
