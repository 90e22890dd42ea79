//! Trailing window over the record log.

use contracts::Record;

use crate::StatsError;

/// First `min(period, len)` records of the log, oldest-first
///
/// Exists only for the duration of one statistics call.
#[derive(Debug, Clone, Copy)]
pub struct Window<'a> {
    records: &'a [Record],
    requested: i64,
}

impl<'a> Window<'a> {
    /// Validate `period` and clamp it to the log length
    ///
    /// # Errors
    /// - `InvalidPeriod` when `period <= 0`
    /// - `EmptyLog` when the log has no records
    pub fn clamp(log: &'a [Record], period: i64) -> Result<Self, StatsError> {
        if period <= 0 {
            return Err(StatsError::InvalidPeriod { period });
        }
        if log.is_empty() {
            return Err(StatsError::EmptyLog);
        }

        let size = usize::try_from(period).unwrap_or(usize::MAX).min(log.len());
        Ok(Self {
            records: &log[..size],
            requested: period,
        })
    }

    pub fn records(&self) -> &'a [Record] {
        self.records
    }

    /// Records in the window (always >= 1)
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Period as requested by the caller
    pub fn requested(&self) -> i64 {
        self.requested
    }

    /// Whether the request exceeded the available history
    pub fn is_clamped(&self) -> bool {
        usize::try_from(self.requested).map_or(true, |p| p > self.records.len())
    }

    pub fn first(&self) -> &'a Record {
        &self.records[0]
    }

    pub fn last(&self) -> &'a Record {
        &self.records[self.records.len() - 1]
    }

    pub fn temperatures(&self) -> impl Iterator<Item = f64> + 'a {
        self.records.iter().map(|r| r.temperature)
    }

    pub fn windspeeds(&self) -> impl Iterator<Item = f64> + 'a {
        self.records.iter().map(|r| r.windspeed)
    }

    pub fn directions(&self) -> impl Iterator<Item = f64> + 'a {
        self.records.iter().map(|r| r.winddirection)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use contracts::{NewSample, Record, RecordClock};

    /// Records with ids 0.. from (temperature, windspeed, direction, interval)
    pub(crate) fn records(rows: &[(f64, f64, f64, i64)]) -> Vec<Record> {
        let ts = RecordClock::Utc.now();
        rows.iter()
            .enumerate()
            .map(|(i, &(temperature, windspeed, winddirection, interval))| {
                NewSample {
                    temperature,
                    windspeed,
                    winddirection,
                    interval,
                }
                .into_record(i as u64, ts)
            })
            .collect()
    }

    pub(crate) fn temps(values: &[f64]) -> Vec<Record> {
        let rows: Vec<_> = values.iter().map(|&t| (t, 0.0, 0.0, 3600)).collect();
        records(&rows)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::temps;
    use super::*;

    #[test]
    fn test_window_takes_oldest_first() {
        let log = temps(&[1.0, 2.0, 3.0, 4.0]);
        let window = Window::clamp(&log, 2).unwrap();
        assert_eq!(window.len(), 2);
        assert_eq!(window.first().id, 0);
        assert_eq!(window.last().id, 1);
        assert!(!window.is_clamped());
    }

    #[test]
    fn test_window_clamps_to_log_length() {
        let log = temps(&[1.0, 2.0, 3.0]);
        let window = Window::clamp(&log, 50).unwrap();
        assert_eq!(window.len(), 3);
        assert_eq!(window.requested(), 50);
        assert!(window.is_clamped());
    }

    #[test]
    fn test_window_rejects_non_positive_period() {
        let log = temps(&[1.0]);
        assert_eq!(
            Window::clamp(&log, 0).unwrap_err(),
            StatsError::InvalidPeriod { period: 0 }
        );
        assert_eq!(
            Window::clamp(&log, -3).unwrap_err(),
            StatsError::InvalidPeriod { period: -3 }
        );
    }

    #[test]
    fn test_window_rejects_empty_log() {
        assert_eq!(Window::clamp(&[], 5).unwrap_err(), StatsError::EmptyLog);
    }

    #[test]
    fn test_huge_period_is_clamped() {
        let log = temps(&[1.0, 2.0]);
        let window = Window::clamp(&log, i64::MAX).unwrap();
        assert_eq!(window.len(), 2);
    }
}
