//! Error types for lineage-graph
//!
//! Data problems inside the core never surface here: malformed rows are
//! filtered, lookup misses return empty collections and inference failures
//! yield `None`. What remains are caller errors (bad JSON, bad config) and
//! failures of the embedded search engine.

use thiserror::Error;

use crate::config::ConfigError;

/// Main error type for lineage-graph operations
#[derive(Debug, Error)]
pub enum LineageError {
    /// Row payload could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Search engine failure (index build or query execution)
    #[error("Search index error: {0}")]
    Search(#[from] tantivy::TantivyError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Invalid argument supplied by the caller
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl LineageError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        LineageError::InvalidInput(msg.into())
    }
}

/// Result type alias for lineage operations
pub type Result<T> = std::result::Result<T, LineageError>;
