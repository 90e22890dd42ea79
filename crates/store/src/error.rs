//! Store error types

use std::path::PathBuf;

use thiserror::Error;

/// Why the persisted log could not be loaded
#[derive(Debug, Error)]
pub enum StoreError {
    /// Log file does not exist
    #[error("log file not found: {}", path.display())]
    Missing { path: PathBuf },

    /// Log file exists but could not be read
    #[error("failed to read log '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Content is not valid JSON
    #[error("invalid JSON in log: {0}")]
    Malformed(#[source] serde_json::Error),

    /// Valid JSON, but not an array
    #[error("log is not a sequence, found {found}")]
    NotASequence { found: &'static str },

    /// An element does not match the record schema
    #[error("record {index} violates the schema: {source}")]
    SchemaViolation {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    /// Short label for metrics
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Missing { .. } => "missing",
            Self::Io { .. } => "io",
            Self::Malformed(_) => "malformed",
            Self::NotASequence { .. } => "not_a_sequence",
            Self::SchemaViolation { .. } => "schema_violation",
        }
    }

    /// Whether the content itself is unusable
    ///
    /// Corrupt content may be replaced by a fresh log on append; IO failures may not.
    pub fn is_corrupt(&self) -> bool {
        matches!(
            self,
            Self::Malformed(_) | Self::NotASequence { .. } | Self::SchemaViolation { .. }
        )
    }
}
