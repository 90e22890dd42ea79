//! Error types for CLI operations.

use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Statistic or listing has no result for the requested window
    #[error("{message}")]
    NotFound { message: String },

    /// Configuration file or overrides rejected
    #[error("Configuration validation failed")]
    InvalidConfig,
}

impl CliError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::NotFound { .. } => 2,
            Self::InvalidConfig => 3,
        }
    }
}
