//! Command implementations.

mod ingest;
mod query;
mod records;
mod summary;
mod validate;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use config_loader::{AppConfig, ConfigLoader};
use observability::Observer;
use stats_engine::WeatherEngine;
use store::JsonFileStore;
use tracing::{debug, info};

use crate::cli::Cli;

pub use ingest::run_ingest;
pub use query::run_query;
pub use records::run_records;
pub use summary::run_summary;
pub use validate::run_validate;

/// Config file picked up from the working directory when `--config` is absent
const DEFAULT_CONFIG: &str = "weather.toml";

/// Config file the command line points at, if any
pub fn config_path(cli: &Cli) -> Option<PathBuf> {
    cli.config.clone().or_else(|| {
        let fallback = Path::new(DEFAULT_CONFIG);
        fallback.exists().then(|| fallback.to_path_buf())
    })
}

/// Load the configuration and apply command-line overrides
///
/// Without a config file every setting takes its default.
pub fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match config_path(cli) {
        Some(path) => ConfigLoader::load_from_path(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AppConfig::default(),
    };

    if let Some(ref store) = cli.store {
        config.store.path = store.clone();
    }
    if let Some(format) = cli.log_format {
        config.observability.log_format = format.into();
    }
    if cli.quiet {
        config.observability.log_level = "warn".to_string();
    } else if cli.verbose > 0 {
        config.observability.log_level = match cli.verbose {
            1 => "debug",
            _ => "trace",
        }
        .to_string();
    }

    ConfigLoader::validate(&config).context("Invalid configuration after overrides")?;
    Ok(config)
}

/// Open the persisted log named by the configuration
pub async fn open_store(config: &AppConfig) -> Result<Arc<JsonFileStore>> {
    let store = JsonFileStore::open(&config.store, Observer::current("store"))
        .await
        .with_context(|| format!("Failed to open log at {}", config.store.path.display()))?;
    info!(path = %store.path().display(), "Log opened");
    Ok(Arc::new(store))
}

/// Engine over the persisted log
pub async fn open_engine(config: &AppConfig) -> Result<WeatherEngine<JsonFileStore>> {
    let store = open_store(config).await?;
    debug!(calm_threshold = config.engine.calm_threshold, "Engine ready");
    Ok(WeatherEngine::new(
        store,
        config.engine.clone(),
        Observer::current("engine"),
    ))
}

/// Print a JSON document on stdout
pub fn print_json(value: &impl serde::Serialize) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}
