//! Core error types for `requery`.

use thiserror::Error;

/// Core error type for request assembly and codec operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Unrecognized HTTP method token.
    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
