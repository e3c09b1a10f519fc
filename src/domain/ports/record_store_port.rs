//! Durable record store port definition.

use async_trait::async_trait;

use crate::domain::entities::{ResolvedImageSet, ServiceId, ServiceIdentifier};
use crate::domain::errors::StoreError;

/// Outcome of an insert into the record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The record was written.
    Inserted,
    /// A record for the same key already existed and was left untouched.
    Duplicate,
}

/// Port for the append-only `(service, identifier)` record store.
///
/// Inserting an existing key must not fail: it reports
/// [`InsertOutcome::Duplicate`] and keeps the stored record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStorePort: Send + Sync {
    /// Retrieves a stored record.
    async fn get(
        &self,
        service: &ServiceId,
        identifier: &ServiceIdentifier,
    ) -> Result<Option<ResolvedImageSet>, StoreError>;

    /// Stores a record keyed by `service` and the set's identifier.
    async fn insert(
        &self,
        service: &ServiceId,
        images: &ResolvedImageSet,
    ) -> Result<InsertOutcome, StoreError>;
}
