//! Error types for anthropic-sse core.

use thiserror::Error;

/// Errors raised while building or loading core configuration.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type alias using CoreError.
pub type Result<T> = std::result::Result<T, CoreError>;
