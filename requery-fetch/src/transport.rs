//! Transport seam between the controller and an HTTP client.

use async_trait::async_trait;
use requery_core::{HttpRequest, HttpResponse};

use crate::error::FetchError;

/// Executes one assembled request and returns the raw response.
///
/// The controller talks to the network exclusively through this trait, so
/// tests and embedders can swap in their own implementation. An
/// implementation must send no headers when the request's header map is
/// empty and must return non-2xx responses as `Ok` - only failures to
/// obtain a response at all are errors.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request and collects the response.
    ///
    /// # Errors
    ///
    /// Returns a `FetchError` when no response could be obtained (network
    /// failure, timeout, malformed response stream).
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, FetchError>;
}
