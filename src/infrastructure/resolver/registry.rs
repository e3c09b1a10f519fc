//! Ordered registry of service adapters.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use super::service_adapter::ServiceAdapter;
use crate::domain::entities::{Resolution, ServiceId, ServiceIdentifier, ServiceInfo};
use crate::domain::errors::ResolveError;
use crate::domain::ports::UrlResolverPort;

/// Registry construction errors.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum RegistryError {
    #[error("service `{0}` is registered more than once")]
    DuplicateService(ServiceId),
}

/// Dispatches URLs to the first adapter whose pattern matches.
///
/// Order only matters for precedence; patterns are expected to be scoped to
/// distinct hosts so at most one ever matches.
#[derive(Debug)]
pub struct ResolverRegistry {
    adapters: Vec<Arc<ServiceAdapter>>,
}

impl ResolverRegistry {
    /// Creates a registry from adapters in dispatch order.
    ///
    /// # Errors
    /// Returns error if two adapters share a service id.
    pub fn new(adapters: Vec<ServiceAdapter>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        for adapter in &adapters {
            if !seen.insert(adapter.id().clone()) {
                return Err(RegistryError::DuplicateService(adapter.id().clone()));
            }
        }

        Ok(Self {
            adapters: adapters.into_iter().map(Arc::new).collect(),
        })
    }

    /// Returns the first adapter matching `url` with the extracted identifier.
    #[must_use]
    pub fn find(&self, url: &str) -> Option<(&Arc<ServiceAdapter>, ServiceIdentifier)> {
        self.adapters
            .iter()
            .find_map(|adapter| adapter.match_url(url).map(|id| (adapter, id)))
    }

    /// Looks up an adapter by service id.
    #[must_use]
    pub fn adapter(&self, id: &ServiceId) -> Option<&Arc<ServiceAdapter>> {
        self.adapters.iter().find(|adapter| adapter.id() == id)
    }

    /// Number of registered services.
    #[must_use]
    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    /// Returns true if no services are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    /// Resolves a URL.
    ///
    /// # Errors
    /// Returns [`ResolveError::NotSupported`] when no pattern matches, or the
    /// matched adapter's error.
    pub async fn resolve(&self, url: &str) -> Result<Resolution, ResolveError> {
        let url = url.trim();
        let Some((adapter, identifier)) = self.find(url) else {
            debug!(url = %url, "No service matches URL");
            return Err(ResolveError::not_supported(url));
        };

        debug!(service = %adapter.id(), identifier = %identifier, "Dispatching URL");

        Ok(match adapter.resolve_identifier(&identifier).await? {
            Some(images) => Resolution::found(adapter.id().clone(), images),
            None => Resolution::NotFound {
                service: adapter.id().clone(),
                identifier,
            },
        })
    }

    /// Lists registered services in dispatch order.
    #[must_use]
    pub fn services(&self) -> Vec<ServiceInfo> {
        self.adapters.iter().map(|a| a.info().clone()).collect()
    }
}

#[async_trait]
impl UrlResolverPort for ResolverRegistry {
    async fn resolve(&self, url: &str) -> Result<Resolution, ResolveError> {
        ResolverRegistry::resolve(self, url).await
    }

    fn services(&self) -> Vec<ServiceInfo> {
        ResolverRegistry::services(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{RawImageMetadata, ResolvedImageSet};
    use crate::domain::errors::LookupError;
    use crate::domain::ports::mocks::MockRemoteLookupPort;
    use crate::infrastructure::store::MemoryRecordStore;
    use regex::Regex;

    fn adapter(id: &str, host: &str, lookup: MockRemoteLookupPort) -> ServiceAdapter {
        let pattern = Regex::new(&format!(r"^https?://{}/(\w+)$", regex::escape(host))).unwrap();
        ServiceAdapter::new(
            ServiceInfo::new(id, id.to_uppercase()),
            pattern,
            Arc::new(lookup),
            Arc::new(MemoryRecordStore::new()),
        )
    }

    fn answering(display: &'static str) -> MockRemoteLookupPort {
        let mut lookup = MockRemoteLookupPort::new();
        lookup
            .expect_fetch()
            .returning(move |_| Ok(RawImageMetadata::new(display, "http://x/t.jpg")));
        lookup
    }

    fn silent() -> MockRemoteLookupPort {
        let mut lookup = MockRemoteLookupPort::new();
        lookup.expect_fetch().times(0);
        lookup
    }

    #[tokio::test]
    async fn test_dispatches_to_matching_adapter() {
        let registry = ResolverRegistry::new(vec![
            adapter("alpha", "alpha.example", silent()),
            adapter("beta", "beta.example", answering("http://beta/d.jpg")),
        ])
        .unwrap();

        let resolution = registry.resolve("https://beta.example/abc").await.unwrap();

        assert_eq!(resolution.service().as_str(), "beta");
        assert_eq!(
            resolution.images().map(ResolvedImageSet::display_url),
            Some("http://beta/d.jpg")
        );
    }

    #[tokio::test]
    async fn test_registry_order_does_not_change_result() {
        let forward = ResolverRegistry::new(vec![
            adapter("alpha", "alpha.example", silent()),
            adapter("beta", "beta.example", answering("http://beta/d.jpg")),
        ])
        .unwrap();
        let reverse = ResolverRegistry::new(vec![
            adapter("beta", "beta.example", answering("http://beta/d.jpg")),
            adapter("alpha", "alpha.example", silent()),
        ])
        .unwrap();

        let a = forward.resolve("https://beta.example/abc").await.unwrap();
        let b = reverse.resolve("https://beta.example/abc").await.unwrap();

        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_unmatched_url_is_not_supported() {
        let registry =
            ResolverRegistry::new(vec![adapter("alpha", "alpha.example", silent())]).unwrap();

        let result = registry.resolve("https://elsewhere.example/abc").await;

        assert!(matches!(result, Err(ResolveError::NotSupported { .. })));
    }

    #[tokio::test]
    async fn test_not_found_resolution() {
        let mut lookup = MockRemoteLookupPort::new();
        lookup.expect_fetch().returning(|_| Err(LookupError::NotFound));
        let registry =
            ResolverRegistry::new(vec![adapter("alpha", "alpha.example", lookup)]).unwrap();

        let resolution = registry.resolve("https://alpha.example/gone").await.unwrap();

        assert_eq!(
            resolution,
            Resolution::NotFound {
                service: ServiceId::new("alpha"),
                identifier: ServiceIdentifier::new("gone"),
            }
        );
        assert!(!resolution.is_found());
    }

    #[test]
    fn test_duplicate_service_rejected() {
        let result = ResolverRegistry::new(vec![
            adapter("alpha", "alpha.example", silent()),
            adapter("alpha", "alpha2.example", silent()),
        ]);

        assert!(matches!(result, Err(RegistryError::DuplicateService(_))));
    }

    #[test]
    fn test_services_listed_in_order() {
        let registry = ResolverRegistry::new(vec![
            adapter("beta", "beta.example", silent()),
            adapter("alpha", "alpha.example", silent()),
        ])
        .unwrap();

        let ids: Vec<_> = registry
            .services()
            .into_iter()
            .map(|s| s.id.to_string())
            .collect();

        assert_eq!(ids, vec!["beta", "alpha"]);
        assert!(registry.adapter(&ServiceId::new("alpha")).is_some());
        assert!(registry.adapter(&ServiceId::new("gamma")).is_none());
        assert_eq!(registry.len(), 2);
    }
}
