//! Remote lookup error types.

use thiserror::Error;

/// Errors returned by a service's remote lookup client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The service reports that the item does not exist.
    #[error("item not found")]
    NotFound,

    /// Transport failure, timeout or server-side failure.
    #[error("remote service unavailable: {0}")]
    RemoteUnavailable(String),

    /// The service answered with something the parser cannot interpret.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl LookupError {
    /// Creates unavailable error.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::RemoteUnavailable(message.into())
    }

    /// Creates malformed response error.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }
}
