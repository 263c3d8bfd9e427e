//! Persisted store of finished export records.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use reclip_models::ExportedClipRecord;

use crate::backend::StorageBackend;
use crate::error::StorageResult;

/// Storage key holding the full export record list as one JSON array.
pub const EXPORTS_KEY: &str = "reclip_exports";

/// The clip library: every successfully exported clip, newest first.
///
/// The list lives in memory and is rewritten to the backend on every
/// mutation. Loading never fails: a missing, unreadable, or corrupt
/// payload logs a warning and starts the library empty, because losing
/// old receipts must not brick the app.
pub struct ExportStore {
    backend: Arc<dyn StorageBackend>,
    records: RwLock<Vec<ExportedClipRecord>>,
}

impl ExportStore {
    /// Opens the store, loading whatever the backend holds.
    pub async fn open(backend: Arc<dyn StorageBackend>) -> Self {
        let records = match backend.get(EXPORTS_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<ExportedClipRecord>>(&raw) {
                Ok(records) => {
                    debug!(count = records.len(), "Loaded export records");
                    records
                }
                Err(e) => {
                    warn!(error = %e, "Corrupt export records, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read export records, starting empty");
                Vec::new()
            }
        };

        Self {
            backend,
            records: RwLock::new(records),
        }
    }

    /// Adds a record to the front of the library and persists the list.
    ///
    /// The in-memory list is updated even if persisting fails, so the
    /// current session keeps the record; the error reports that it may
    /// not survive a restart.
    pub async fn add(&self, record: ExportedClipRecord) -> StorageResult<()> {
        let mut records = self.records.write().await;
        records.insert(0, record);
        self.persist(&records).await
    }

    /// Removes the record with the given id, if present.
    pub async fn remove(&self, id: &str) -> StorageResult<()> {
        let mut records = self.records.write().await;
        records.retain(|r| r.id != id);
        self.persist(&records).await
    }

    /// Empties the library and deletes the persisted key.
    pub async fn clear(&self) -> StorageResult<()> {
        let mut records = self.records.write().await;
        records.clear();
        self.backend.remove(EXPORTS_KEY).await
    }

    /// All records, newest first.
    pub async fn records(&self) -> Vec<ExportedClipRecord> {
        self.records.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Records targeting the given platform tag (e.g. "tiktok", "generic").
    pub async fn by_platform(&self, platform: &str) -> Vec<ExportedClipRecord> {
        self.records
            .read()
            .await
            .iter()
            .filter(|r| r.platform == platform)
            .cloned()
            .collect()
    }

    /// Records exported inside the given range, bounds inclusive.
    pub async fn by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<ExportedClipRecord> {
        self.records
            .read()
            .await
            .iter()
            .filter(|r| r.export_date >= start && r.export_date <= end)
            .cloned()
            .collect()
    }

    async fn persist(&self, records: &[ExportedClipRecord]) -> StorageResult<()> {
        let raw = serde_json::to_string(records)?;
        self.backend.set(EXPORTS_KEY, &raw).await
    }
}
