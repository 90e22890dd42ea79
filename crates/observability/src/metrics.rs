//! Store and engine metrics
//!
//! Thin wrappers over the `metrics` facade. Without an installed recorder
//! every call is a no-op.

use metrics::{counter, gauge};

/// Outcome label for a statistics query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    /// Value produced
    Ok,
    /// Input or data insufficient
    NoResult,
}

impl QueryStatus {
    fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::NoResult => "no_result",
        }
    }
}

/// Record a statistics query
pub fn record_query(operation: &'static str, status: QueryStatus) {
    counter!(
        "weather_stats_queries_total",
        "operation" => operation,
        "status" => status.as_str()
    )
    .increment(1);
}

/// Record an append attempt
pub fn record_append(success: bool) {
    let status = if success { "success" } else { "failure" };
    counter!("weather_store_appends_total", "status" => status).increment(1);
}

/// Record the current log length
pub fn record_log_size(len: usize) {
    gauge!("weather_store_records").set(len as f64);
}

/// Record one ingestion attempt for a sample source
pub fn record_ingest(source: &'static str, success: bool) {
    let status = if success { "success" } else { "failure" };
    counter!(
        "weather_ingest_samples_total",
        "source" => source,
        "status" => status
    )
    .increment(1);
}

/// Record a read that fell back to an empty log
pub fn record_read_fallback(reason: &'static str) {
    counter!("weather_store_read_fallbacks_total", "reason" => reason).increment(1);
}
