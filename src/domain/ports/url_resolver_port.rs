//! Port definition for URL resolution.

use async_trait::async_trait;

use crate::domain::entities::{Resolution, ServiceInfo};
use crate::domain::errors::ResolveError;

/// Port for turning a hosting page URL into direct image URLs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlResolverPort: Send + Sync {
    /// Resolves a URL through the first matching service.
    async fn resolve(&self, url: &str) -> Result<Resolution, ResolveError>;

    /// Lists the supported services in dispatch order.
    fn services(&self) -> Vec<ServiceInfo>;
}
