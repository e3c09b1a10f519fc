//! Resolution error types.

use thiserror::Error;

use super::{LookupError, StoreError};
use crate::domain::entities::ServiceId;

/// Errors surfaced by the registry and service adapters.
///
/// "Not found" is deliberately absent: it is a normal outcome.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ResolveError {
    #[error("no supported service matches {url}")]
    NotSupported { url: String },

    #[error("{service} is unavailable: {message}")]
    RemoteUnavailable { service: ServiceId, message: String },

    #[error("{service} returned a malformed response: {message}")]
    MalformedResponse { service: ServiceId, message: String },

    #[error("record store error for {service}: {source}")]
    Store {
        service: ServiceId,
        #[source]
        source: StoreError,
    },
}

impl ResolveError {
    /// Creates not supported error.
    #[must_use]
    pub fn not_supported(url: impl Into<String>) -> Self {
        Self::NotSupported { url: url.into() }
    }

    /// Creates store error.
    #[must_use]
    pub const fn store(service: ServiceId, source: StoreError) -> Self {
        Self::Store { service, source }
    }

    /// Converts a lookup failure that is not `NotFound`.
    ///
    /// Returns `None` for `NotFound`, which callers turn into an empty result.
    #[must_use]
    pub fn from_lookup(service: &ServiceId, error: LookupError) -> Option<Self> {
        match error {
            LookupError::NotFound => None,
            LookupError::RemoteUnavailable(message) => Some(Self::RemoteUnavailable {
                service: service.clone(),
                message,
            }),
            LookupError::MalformedResponse(message) => Some(Self::MalformedResponse {
                service: service.clone(),
                message,
            }),
        }
    }

    /// Returns whether a retry may succeed.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::RemoteUnavailable { .. } | Self::Store { .. })
    }

    /// Returns the service involved, if any.
    #[must_use]
    pub const fn service(&self) -> Option<&ServiceId> {
        match self {
            Self::NotSupported { .. } => None,
            Self::RemoteUnavailable { service, .. }
            | Self::MalformedResponse { service, .. }
            | Self::Store { service, .. } => Some(service),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_not_an_error() {
        let service = ServiceId::new("photozou");
        assert!(ResolveError::from_lookup(&service, LookupError::NotFound).is_none());
    }

    #[test]
    fn test_lookup_errors_keep_their_kind() {
        let service = ServiceId::new("photozou");

        let unavailable =
            ResolveError::from_lookup(&service, LookupError::unavailable("timed out")).unwrap();
        assert!(matches!(unavailable, ResolveError::RemoteUnavailable { .. }));
        assert!(unavailable.is_recoverable());

        let malformed =
            ResolveError::from_lookup(&service, LookupError::malformed("bad xml")).unwrap();
        assert!(matches!(malformed, ResolveError::MalformedResponse { .. }));
        assert!(!malformed.is_recoverable());
        assert_eq!(malformed.service(), Some(&service));
    }

    #[test]
    fn test_not_supported_message() {
        let error = ResolveError::not_supported("https://example.com/a.png");
        assert_eq!(
            error.to_string(),
            "no supported service matches https://example.com/a.png"
        );
        assert!(error.service().is_none());
    }
}
