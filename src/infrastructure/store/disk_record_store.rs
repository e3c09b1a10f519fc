//! Disk-backed record store for persistence across runs.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tokio::fs;
use tracing::{debug, trace};

use crate::domain::entities::{ResolvedImageSet, ServiceId, ServiceIdentifier};
use crate::domain::errors::StoreError;
use crate::domain::ports::{InsertOutcome, RecordStorePort};

/// On-disk envelope around a resolved set.
#[derive(Debug, Serialize, Deserialize)]
struct StoredRecord {
    service: ServiceId,
    stored_at: DateTime<Utc>,
    #[serde(flatten)]
    images: ResolvedImageSet,
}

/// Append-only record store keeping one JSON file per record.
///
/// Files live at `<root>/<service>/<sha256(identifier)>.json`. Inserts are
/// written to a temporary file and linked into place without clobbering, so
/// two writers racing on the same key leave exactly one intact record.
#[derive(Debug, Clone)]
pub struct DiskRecordStore {
    root: PathBuf,
}

impl DiskRecordStore {
    /// Creates a store rooted at `root`.
    ///
    /// # Errors
    /// Returns error if the directory cannot be created.
    pub async fn new(root: PathBuf) -> Result<Self, StoreError> {
        fs::create_dir_all(&root).await?;
        debug!(path = %root.display(), "Opened record store");
        Ok(Self { root })
    }

    /// Creates a store in the default location (`<data_dir>/records`).
    ///
    /// # Errors
    /// Returns error if the directory cannot be created.
    pub async fn default_location() -> Result<Self, StoreError> {
        Self::new(default_records_path()).await
    }

    /// Root directory of the store.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn service_dir(&self, service: &ServiceId) -> PathBuf {
        let name: String = service
            .as_str()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.root.join(name)
    }

    fn record_path(&self, service: &ServiceId, identifier: &ServiceIdentifier) -> PathBuf {
        let digest = Sha256::digest(identifier.as_str().as_bytes());
        self.service_dir(service)
            .join(format!("{}.json", hex::encode(digest)))
    }
}

#[async_trait]
impl RecordStorePort for DiskRecordStore {
    async fn get(
        &self,
        service: &ServiceId,
        identifier: &ServiceIdentifier,
    ) -> Result<Option<ResolvedImageSet>, StoreError> {
        let path = self.record_path(service, identifier);

        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                trace!(service = %service, identifier = %identifier, "Record store miss");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let record: StoredRecord = serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::corrupt(path.display().to_string(), e.to_string()))?;

        if record.images.identifier() != identifier {
            return Err(StoreError::corrupt(
                path.display().to_string(),
                format!("record belongs to {}", record.images.identifier()),
            ));
        }

        trace!(service = %service, identifier = %identifier, "Record store hit");
        Ok(Some(record.images))
    }

    async fn insert(
        &self,
        service: &ServiceId,
        images: &ResolvedImageSet,
    ) -> Result<InsertOutcome, StoreError> {
        let dir = self.service_dir(service);
        let path = self.record_path(service, images.identifier());
        let record = StoredRecord {
            service: service.clone(),
            stored_at: Utc::now(),
            images: images.clone(),
        };
        let content = serde_json::to_vec_pretty(&record)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let outcome = tokio::task::spawn_blocking(move || write_new(&dir, &path, &content))
            .await
            .map_err(|e| StoreError::Unavailable(format!("write task panicked: {e}")))??;

        debug!(service = %service, identifier = %images.identifier(), outcome = ?outcome, "Record store insert");
        Ok(outcome)
    }
}

/// Writes `content` to `path` only if nothing is there yet.
fn write_new(dir: &Path, path: &Path, content: &[u8]) -> Result<InsertOutcome, StoreError> {
    if path.exists() {
        return Ok(InsertOutcome::Duplicate);
    }

    std::fs::create_dir_all(dir)?;
    let mut temp_file = tempfile::NamedTempFile::new_in(dir)?;
    temp_file.write_all(content)?;
    temp_file.as_file().sync_all()?;

    match temp_file.persist_noclobber(path) {
        Ok(_) => Ok(InsertOutcome::Inserted),
        Err(e) if e.error.kind() == std::io::ErrorKind::AlreadyExists => {
            Ok(InsertOutcome::Duplicate)
        }
        Err(e) => Err(e.error.into()),
    }
}

/// Returns the default record store path.
fn default_records_path() -> PathBuf {
    directories::ProjectDirs::from("com", "linuxmobile", "picfetch").map_or_else(
        || std::env::temp_dir().join("picfetch").join("records"),
        |dirs| dirs.data_dir().join("records"),
    )
}
