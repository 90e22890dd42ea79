//! Config validation
//!
//! Rules:
//! - store path non-empty
//! - calm threshold finite and >= 0
//! - default period and hours > 0
//! - latitude in [-90, 90], longitude in [-180, 180]
//! - source timeout > 0, base URL is http(s)

use contracts::{AppConfig, ContractError, EngineConfig, SourceConfig, StoreConfig};

/// Validate an `AppConfig`
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(config: &AppConfig) -> Result<(), ContractError> {
    validate_store(&config.store)?;
    validate_engine(&config.engine)?;
    validate_source(&config.source)?;
    Ok(())
}

fn validate_store(store: &StoreConfig) -> Result<(), ContractError> {
    if store.path.as_os_str().is_empty() {
        return Err(ContractError::config_validation(
            "store.path",
            "store path cannot be empty",
        ));
    }
    Ok(())
}

fn validate_engine(engine: &EngineConfig) -> Result<(), ContractError> {
    if !engine.calm_threshold.is_finite() || engine.calm_threshold < 0.0 {
        return Err(ContractError::config_validation(
            "engine.calm_threshold",
            format!(
                "calm_threshold must be a finite number >= 0, got {}",
                engine.calm_threshold
            ),
        ));
    }

    for (field, value) in [
        ("engine.default_period", engine.default_period),
        ("engine.default_hours", engine.default_hours),
    ] {
        if value <= 0 {
            return Err(ContractError::config_validation(
                field,
                format!("must be > 0, got {value}"),
            ));
        }
    }
    Ok(())
}

fn validate_source(source: &SourceConfig) -> Result<(), ContractError> {
    if !(-90.0..=90.0).contains(&source.latitude) {
        return Err(ContractError::config_validation(
            "source.latitude",
            format!("latitude must be within [-90, 90], got {}", source.latitude),
        ));
    }

    if !(-180.0..=180.0).contains(&source.longitude) {
        return Err(ContractError::config_validation(
            "source.longitude",
            format!(
                "longitude must be within [-180, 180], got {}",
                source.longitude
            ),
        ));
    }

    if source.timeout_secs == 0 {
        return Err(ContractError::config_validation(
            "source.timeout_secs",
            "timeout_secs must be > 0",
        ));
    }

    if !(source.base_url.starts_with("http://") || source.base_url.starts_with("https://")) {
        return Err(ContractError::config_validation(
            "source.base_url",
            format!(
                "base_url must start with http:// or https://, got '{}'",
                source.base_url
            ),
        ));
    }
    Ok(())
}
