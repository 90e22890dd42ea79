//! Ingestion error types

use contracts::ContractError;
use thiserror::Error;

/// Why a sample could not be ingested
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Request failed, timed out, or returned a non-success status
    #[error("weather request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body lacks the expected shape
    #[error("unexpected weather response: {message}")]
    UnexpectedResponse {
        /// What was wrong with the body
        message: String,
    },

    /// Sample rejected before reaching the store
    #[error("invalid sample from {source_name}: {source}")]
    InvalidSample {
        /// Sample source name
        source_name: String,
        #[source]
        source: ContractError,
    },

    /// Store refused or failed the append
    #[error("failed to store sample: {0}")]
    Store(#[source] ContractError),
}

impl IngestionError {
    pub fn unexpected_response(message: impl Into<String>) -> Self {
        Self::UnexpectedResponse {
            message: message.into(),
        }
    }
}

/// Ingestion Result type alias
pub type Result<T> = std::result::Result<T, IngestionError>;
