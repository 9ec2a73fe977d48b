//! Fetch error types.

use thiserror::Error;

/// Error type for transport operations.
///
/// Transport failures never escape a fetch cycle: the controller folds them
/// into an [`ErrorRecord`](requery_core::ErrorRecord) for the error cell and
/// the `on_error` callback.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The transport produced a response it could not represent.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Failure from a custom transport implementation.
    #[error("{0}")]
    Other(String),
}
