//! Typed errors for the venue pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.
//!
//! Note that these errors never cross the pipeline boundary: discovery and
//! geocoding recover locally (log and skip the failing sub-request), so
//! `Pipeline::run` is infallible and an empty result list is the expected
//! signal when every data source fails.

use thiserror::Error;

/// Errors that can occur while talking to a place-search provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HTTP transport failed (connect error, timeout, TLS, ...)
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Provider returned a non-success status code
    #[error("provider returned status {status}")]
    Status { status: u16 },

    /// Response body did not match the provider's documented shape
    #[error("malformed response body: {0}")]
    MalformedBody(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProviderError::MalformedBody(Box::new(err))
        } else {
            ProviderError::Http(Box::new(err))
        }
    }
}

/// Result type alias for provider sub-requests.
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;
