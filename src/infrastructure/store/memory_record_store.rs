//! In-process record store.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::trace;

use crate::domain::entities::{ResolvedImageSet, ServiceId, ServiceIdentifier};
use crate::domain::errors::StoreError;
use crate::domain::ports::{InsertOutcome, RecordStorePort};

/// Record store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: RwLock<HashMap<(ServiceId, ServiceIdentifier), ResolvedImageSet>>,
}

impl MemoryRecordStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Returns true if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl RecordStorePort for MemoryRecordStore {
    async fn get(
        &self,
        service: &ServiceId,
        identifier: &ServiceIdentifier,
    ) -> Result<Option<ResolvedImageSet>, StoreError> {
        let records = self.records.read().await;
        Ok(records
            .get(&(service.clone(), identifier.clone()))
            .cloned())
    }

    async fn insert(
        &self,
        service: &ServiceId,
        images: &ResolvedImageSet,
    ) -> Result<InsertOutcome, StoreError> {
        let mut records = self.records.write().await;
        match records.entry((service.clone(), images.identifier().clone())) {
            Entry::Occupied(_) => {
                trace!(service = %service, identifier = %images.identifier(), "Record already present");
                Ok(InsertOutcome::Duplicate)
            }
            Entry::Vacant(slot) => {
                slot.insert(images.clone());
                Ok(InsertOutcome::Inserted)
            }
        }
    }
}
