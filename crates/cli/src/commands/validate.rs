//! `validate` command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use config_loader::{AppConfig, ConfigLoader};
use serde::Serialize;
use tracing::info;

use super::config_path;
use crate::cli::{Cli, ValidateArgs};
use crate::error::CliError;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    version: String,
    store_path: String,
    clock: String,
    calm_threshold: f64,
    default_period: i64,
    default_hours: i64,
    latitude: f64,
    longitude: f64,
}

/// Execute the `validate` command
pub fn run_validate(cli: &Cli, args: &ValidateArgs) -> Result<()> {
    let path = config_path(cli);
    let result = match path.as_deref() {
        Some(path) => {
            info!(config = %path.display(), "Validating configuration");
            validate_file(path)
        }
        None => {
            info!("No configuration file, validating defaults");
            summarize(None, &AppConfig::default())
        }
    };

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{json}");
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        Err(CliError::InvalidConfig.into())
    }
}

fn validate_file(path: &Path) -> ValidationResult {
    let config_path = Some(path.display().to_string());

    if !path.exists() {
        return ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("File not found: {}", path.display())),
            warnings: None,
            summary: None,
        };
    }

    match ConfigLoader::load_from_path(path) {
        Ok(config) => summarize(config_path, &config),
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

fn summarize(config_path: Option<String>, config: &AppConfig) -> ValidationResult {
    let warnings = collect_warnings(config);
    ValidationResult {
        valid: true,
        config_path,
        error: None,
        warnings: (!warnings.is_empty()).then_some(warnings),
        summary: Some(ConfigSummary {
            version: format!("{:?}", config.version),
            store_path: config.store.path.display().to_string(),
            clock: format!("{:?}", config.store.clock),
            calm_threshold: config.engine.calm_threshold,
            default_period: config.engine.default_period,
            default_hours: config.engine.default_hours,
            latitude: config.source.latitude,
            longitude: config.source.longitude,
        }),
    }
}

/// Collect configuration warnings (non-fatal issues)
fn collect_warnings(config: &AppConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    if config.engine.default_hours < 2 {
        warnings.push(
            "engine.default_hours < 2 - rate of change will have no result by default".to_string(),
        );
    }

    if config.engine.calm_threshold == 0.0 {
        warnings.push("engine.calm_threshold is 0 - no record can be calm".to_string());
    }

    if config.store.path.extension().and_then(|e| e.to_str()) != Some("json") {
        warnings.push(format!(
            "store.path '{}' does not end in .json",
            config.store.path.display()
        ));
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    let shown = result.config_path.as_deref().unwrap_or("<defaults>");
    if result.valid {
        println!("✓ Configuration is valid: {shown}");

        if let Some(ref summary) = result.summary {
            println!("\n  Version: {}", summary.version);
            println!("  Log: {} ({} clock)", summary.store_path, summary.clock);
            println!("  Calm threshold: {} km/h", summary.calm_threshold);
            println!(
                "  Default window: {} records, {} hours",
                summary.default_period, summary.default_hours
            );
            println!("  Location: {}, {}", summary.latitude, summary.longitude);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {warning}");
            }
        }
    } else {
        println!("✗ Configuration is invalid: {shown}");
        if let Some(ref error) = result.error {
            println!("\n  Error: {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_have_no_warnings() {
        assert!(collect_warnings(&AppConfig::default()).is_empty());
    }

    #[test]
    fn test_invalid_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weather.toml");
        std::fs::write(&path, "[source]\nlatitude = 120.0\n").unwrap();

        let result = validate_file(&path);
        assert!(!result.valid);
        assert!(result.error.unwrap().contains("source.latitude"));
    }

    #[test]
    fn test_missing_file_is_reported() {
        let result = validate_file(Path::new("/nonexistent/weather.toml"));
        assert!(!result.valid);
        assert!(result.error.unwrap().contains("File not found"));
    }
}
