//! Per-service resolution: memo, then record store, then remote lookup.

use std::sync::Arc;

use regex::Regex;
use tracing::{debug, trace, warn};

use super::memo_cache::MemoCache;
use crate::domain::entities::{
    ImageSize, ResolvedImageSet, ServiceId, ServiceIdentifier, ServiceInfo,
};
use crate::domain::errors::ResolveError;
use crate::domain::ports::{InsertOutcome, RecordStorePort, RemoteLookupPort};

/// One hosting service: its URL pattern plus cached resolution.
///
/// The identifier is taken from the pattern's `id` capture group, or the
/// first group when the pattern has no `id` group.
pub struct ServiceAdapter {
    info: ServiceInfo,
    pattern: Regex,
    lookup: Arc<dyn RemoteLookupPort>,
    store: Arc<dyn RecordStorePort>,
    memo: MemoCache<ServiceIdentifier, ResolvedImageSet>,
}

impl std::fmt::Debug for ServiceAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAdapter")
            .field("info", &self.info)
            .field("pattern", &self.pattern.as_str())
            .finish_non_exhaustive()
    }
}

impl ServiceAdapter {
    /// Creates an adapter with a single-slot memo.
    #[must_use]
    pub fn new(
        info: ServiceInfo,
        pattern: Regex,
        lookup: Arc<dyn RemoteLookupPort>,
        store: Arc<dyn RecordStorePort>,
    ) -> Self {
        Self {
            info,
            pattern,
            lookup,
            store,
            memo: MemoCache::single(),
        }
    }

    /// Replaces the memo with one of the given capacity.
    #[must_use]
    pub fn with_memo_capacity(mut self, capacity: usize) -> Self {
        self.memo = MemoCache::new(capacity);
        self
    }

    /// Service description.
    #[must_use]
    pub const fn info(&self) -> &ServiceInfo {
        &self.info
    }

    /// Service machine name.
    #[must_use]
    pub const fn id(&self) -> &ServiceId {
        &self.info.id
    }

    /// The memo in front of the record store.
    #[must_use]
    pub const fn memo(&self) -> &MemoCache<ServiceIdentifier, ResolvedImageSet> {
        &self.memo
    }

    /// Extracts the identifier if `url` belongs to this service. Surrounding
    /// whitespace is ignored.
    #[must_use]
    pub fn match_url(&self, url: &str) -> Option<ServiceIdentifier> {
        let caps = self.pattern.captures(url.trim())?;
        caps.name("id")
            .or_else(|| caps.get(1))
            .map(|m| ServiceIdentifier::new(m.as_str()))
    }

    /// Matches and resolves a URL. `Ok(None)` when the URL does not match or
    /// the service has no such item.
    ///
    /// # Errors
    /// Returns error if the record store or remote lookup fails.
    pub async fn resolve_url(&self, url: &str) -> Result<Option<ResolvedImageSet>, ResolveError> {
        match self.match_url(url) {
            Some(identifier) => self.resolve_identifier(&identifier).await,
            None => Ok(None),
        }
    }

    /// Resolves an identifier to its image set.
    ///
    /// Returns `Ok(None)` when the service reports the item does not exist.
    /// Nothing is cached in that case.
    ///
    /// # Errors
    /// Returns error if the record store cannot be read, the service is
    /// unreachable, or its response cannot be parsed.
    pub async fn resolve_identifier(
        &self,
        identifier: &ServiceIdentifier,
    ) -> Result<Option<ResolvedImageSet>, ResolveError> {
        if let Some(images) = self.memo.get(identifier) {
            trace!(service = %self.info.id, identifier = %identifier, "Resolved from memo");
            return Ok(Some(images));
        }

        let stored = self
            .store
            .get(&self.info.id, identifier)
            .await
            .map_err(|e| ResolveError::store(self.info.id.clone(), e))?;

        if let Some(images) = stored {
            debug!(service = %self.info.id, identifier = %identifier, "Resolved from record store");
            self.memo.put(identifier.clone(), images.clone());
            return Ok(Some(images));
        }

        debug!(service = %self.info.id, identifier = %identifier, "Looking up remotely");

        let metadata = match self.lookup.fetch(identifier).await {
            Ok(metadata) => metadata,
            Err(e) => {
                return match ResolveError::from_lookup(&self.info.id, e) {
                    None => {
                        debug!(service = %self.info.id, identifier = %identifier, "Item not found");
                        Ok(None)
                    }
                    Some(err) => {
                        warn!(service = %self.info.id, identifier = %identifier, error = %err, "Remote lookup failed");
                        Err(err)
                    }
                };
            }
        };

        let images = ResolvedImageSet::from_metadata(identifier.clone(), metadata);
        Ok(Some(self.persist(images).await))
    }

    /// Full/original resolution URL.
    ///
    /// # Errors
    /// See [`Self::resolve_identifier`].
    pub async fn full_size(
        &self,
        identifier: &ServiceIdentifier,
    ) -> Result<Option<String>, ResolveError> {
        self.size(identifier, ImageSize::Full).await
    }

    /// Display resolution URL.
    ///
    /// # Errors
    /// See [`Self::resolve_identifier`].
    pub async fn display_size(
        &self,
        identifier: &ServiceIdentifier,
    ) -> Result<Option<String>, ResolveError> {
        self.size(identifier, ImageSize::Display).await
    }

    /// Thumbnail URL.
    ///
    /// # Errors
    /// See [`Self::resolve_identifier`].
    pub async fn thumbnail(
        &self,
        identifier: &ServiceIdentifier,
    ) -> Result<Option<String>, ResolveError> {
        self.size(identifier, ImageSize::Thumbnail).await
    }

    async fn size(
        &self,
        identifier: &ServiceIdentifier,
        size: ImageSize,
    ) -> Result<Option<String>, ResolveError> {
        Ok(self
            .resolve_identifier(identifier)
            .await?
            .map(|images| images.url(size).to_owned()))
    }

    /// Writes a freshly looked-up set. On a duplicate key the stored record
    /// wins. If the write fails the set is returned but not memoized.
    async fn persist(&self, images: ResolvedImageSet) -> ResolvedImageSet {
        let identifier = images.identifier().clone();

        match self.store.insert(&self.info.id, &images).await {
            Ok(InsertOutcome::Inserted) => {
                debug!(service = %self.info.id, identifier = %identifier, "Stored resolved images");
                self.memo.put(identifier, images.clone());
                images
            }
            Ok(InsertOutcome::Duplicate) => {
                debug!(service = %self.info.id, identifier = %identifier, "Record already stored, using existing");
                match self.store.get(&self.info.id, &identifier).await {
                    Ok(Some(existing)) => {
                        self.memo.put(identifier, existing.clone());
                        existing
                    }
                    Ok(None) => {
                        warn!(service = %self.info.id, identifier = %identifier, "Duplicate record vanished");
                        images
                    }
                    Err(e) => {
                        warn!(service = %self.info.id, identifier = %identifier, error = %e, "Failed to re-read duplicate record");
                        images
                    }
                }
            }
            Err(e) => {
                warn!(service = %self.info.id, identifier = %identifier, error = %e, "Failed to store resolved images");
                images
            }
        }
    }
}
