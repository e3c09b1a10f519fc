//! Batch URL resolution use case.

use std::sync::Arc;

use futures_util::stream::{self, StreamExt};
use tracing::{debug, info};

use crate::application::dto::{BatchSummary, UrlReport};
use crate::domain::entities::ServiceInfo;
use crate::domain::ports::UrlResolverPort;

/// Resolves a list of URLs with bounded concurrency.
pub struct ResolveUrlsUseCase {
    resolver: Arc<dyn UrlResolverPort>,
    max_concurrent: usize,
}

impl ResolveUrlsUseCase {
    /// Creates new use case. `max_concurrent` is clamped to at least 1.
    #[must_use]
    pub fn new(resolver: Arc<dyn UrlResolverPort>, max_concurrent: usize) -> Self {
        Self {
            resolver,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Resolves every URL. Reports come back in input order.
    ///
    /// Individual failures are recorded in their report and never abort the
    /// batch.
    pub async fn execute(&self, urls: &[String]) -> Vec<UrlReport> {
        debug!(count = urls.len(), max_concurrent = self.max_concurrent, "Resolving URLs");

        let reports: Vec<UrlReport> = stream::iter(urls.iter().cloned())
            .map(|url| {
                let resolver = Arc::clone(&self.resolver);
                async move {
                    let result = resolver.resolve(&url).await;
                    UrlReport::new(url, result)
                }
            })
            .buffered(self.max_concurrent)
            .collect()
            .await;

        info!(summary = %BatchSummary::from_reports(&reports), "Batch resolved");
        reports
    }

    /// Lists the supported services in dispatch order.
    #[must_use]
    pub fn services(&self) -> Vec<ServiceInfo> {
        self.resolver.services()
    }
}
