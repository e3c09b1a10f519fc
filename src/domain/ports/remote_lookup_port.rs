//! Port definition for per-service remote metadata lookups.

use async_trait::async_trait;

use crate::domain::entities::{RawImageMetadata, ServiceIdentifier};
use crate::domain::errors::LookupError;

/// Port for querying a hosting service's metadata endpoint.
///
/// Implementations must bound every request with a timeout and report it as
/// [`LookupError::RemoteUnavailable`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteLookupPort: Send + Sync {
    /// Fetches raw metadata for an identifier.
    async fn fetch(&self, identifier: &ServiceIdentifier) -> Result<RawImageMetadata, LookupError>;
}
