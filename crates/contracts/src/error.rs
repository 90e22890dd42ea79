//! Layered error definitions
//!
//! Categorized by source: config / sample / storage

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Sample Errors =====
    /// Candidate sample rejected before it reached storage
    #[error("invalid sample field '{field}': {message}")]
    InvalidSample { field: String, message: String },

    // ===== Storage Errors =====
    /// Persisted log could not be written
    #[error("storage error at '{path}': {message}")]
    Storage { path: String, message: String },

    /// No id is left after the last record's
    #[error("record id space exhausted after id {last}")]
    IdExhausted { last: u64 },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create sample validation error
    pub fn invalid_sample(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSample {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create storage error
    pub fn storage(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Storage {
            path: path.into(),
            message: message.into(),
        }
    }
}
