//! # Observability
//!
//! Tracing, metrics, and the logging collaborator injected into the store and
//! the engine.
//!
//! ## Features
//!
//! - Tracing initialization (JSON/Pretty/Compact)
//! - Prometheus metrics export
//! - `Observer`: per-component dispatch, so library code never relies on the
//!   process-global subscriber
//! - `EventCapture`: records events for assertions in tests
//!
//! ## Example
//!
//! ```ignore
//! use observability::{init_with_config, Observer};
//!
//! init_with_config(&config.observability)?;
//! let store = JsonFileStore::open(&config.store, Observer::current("store")).await?;
//! ```

pub mod capture;
pub mod metrics;
mod observer;

use anyhow::{Context, Result};
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub use crate::capture::{CapturedEvent, EventCapture};
pub use crate::metrics::{
    record_append, record_ingest, record_log_size, record_query, record_read_fallback,
    QueryStatus,
};
pub use contracts::{LogFormat, ObservabilitySettings};
pub use observer::Observer;

/// Initialize observability with default settings
///
/// - Tracing: pretty format, honours RUST_LOG
/// - Prometheus: disabled
pub fn init() -> Result<()> {
    init_with_config(&ObservabilitySettings::default())
}

/// Initialize with custom settings
///
/// Installs the global subscriber for binaries, writing to stderr so stdout
/// stays free for command output. Library components still log through the
/// `Observer` they were built with.
pub fn init_with_config(config: &ObservabilitySettings) -> Result<()> {
    // 1. Initialize Tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let fmt_layer = match config.log_format {
        LogFormat::Json => fmt::layer()
            .with_writer(std::io::stderr)
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Pretty => fmt::layer().with_writer(std::io::stderr).pretty().boxed(),
        LogFormat::Compact => fmt::layer()
            .with_writer(std::io::stderr)
            .compact()
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    // 2. Initialize Prometheus Exporter (if enabled)
    if let Some(port) = config.metrics_port {
        init_metrics_only(port)?;
    }

    tracing::info!(
        log_format = ?config.log_format,
        metrics_port = ?config.metrics_port,
        "Observability initialized"
    );

    Ok(())
}

/// Initialize Prometheus metrics only (no tracing)
pub fn init_metrics_only(port: u16) -> Result<()> {
    PrometheusBuilder::new()
        .with_http_listener(([0, 0, 0, 0], port))
        .install()
        .context("Failed to install Prometheus recorder")?;

    tracing::info!(port = port, "Prometheus metrics endpoint initialized");
    Ok(())
}
