//! Config parsing
//!
//! TOML is the primary format; JSON is accepted as well.

use contracts::{AppConfig, ContractError};

/// Config file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML (recommended)
    Toml,
    /// JSON
    Json,
}

impl ConfigFormat {
    /// Infer the format from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Parse a TOML config
pub fn parse_toml(content: &str) -> Result<AppConfig, ContractError> {
    toml::from_str(content).map_err(|e| ContractError::ConfigParse {
        message: format!("TOML parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse a JSON config
pub fn parse_json(content: &str) -> Result<AppConfig, ContractError> {
    serde_json::from_str(content).map_err(|e| ContractError::ConfigParse {
        message: format!("JSON parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

pub fn parse(content: &str, format: ConfigFormat) -> Result<AppConfig, ContractError> {
    match format {
        ConfigFormat::Toml => parse_toml(content),
        ConfigFormat::Json => parse_json(content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{LogFormat, RecordClock};

    #[test]
    fn test_parse_toml_sections() {
        let content = r#"
[store]
path = "/var/lib/weather/log.json"
clock = "utc"

[engine]
calm_threshold = 3.5

[observability]
log_format = "json"
metrics_port = 9000
"#;
        let config = parse_toml(content).unwrap();
        assert_eq!(config.store.path.to_str(), Some("/var/lib/weather/log.json"));
        assert_eq!(config.store.clock, RecordClock::Utc);
        assert_eq!(config.engine.calm_threshold, 3.5);
        assert_eq!(config.engine.default_period, 24);
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.observability.metrics_port, Some(9000));
    }

    #[test]
    fn test_parse_empty_toml_uses_defaults() {
        let config = parse_toml("").unwrap();
        assert_eq!(config.store.path.to_str(), Some("data/weather_log.json"));
        assert_eq!(config.engine.default_hours, 10);
        assert_eq!(config.source.latitude, 35.685017);
        assert_eq!(config.source.timeout_secs, 10);
    }

    #[test]
    fn test_parse_json_minimal() {
        let content = r#"{
            "store": { "path": "log.json" },
            "source": { "latitude": 52.52, "longitude": 13.41 }
        }"#;
        let config = parse_json(content).unwrap();
        assert_eq!(config.source.latitude, 52.52);
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_parse_toml_syntax_error() {
        let err = parse_toml("invalid toml [[[").unwrap_err();
        assert!(matches!(err, ContractError::ConfigParse { .. }));
    }

    #[test]
    fn test_parse_rejects_wrong_type() {
        let err = parse_toml("[engine]\ndefault_period = \"day\"\n").unwrap_err();
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ConfigFormat::from_extension("toml"), Some(ConfigFormat::Toml));
        assert_eq!(ConfigFormat::from_extension("TOML"), Some(ConfigFormat::Toml));
        assert_eq!(ConfigFormat::from_extension("json"), Some(ConfigFormat::Json));
        assert_eq!(ConfigFormat::from_extension("yaml"), None);
    }
}
