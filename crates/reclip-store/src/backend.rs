//! Pluggable key-value persistence behind the typed stores.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StorageResult;

/// Durable string-keyed storage, one JSON document per key.
///
/// This is the seam between the typed stores and whatever actually holds
/// the bytes. Implementations must tolerate concurrent calls; the stores
/// above them serialize writes per key.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Reads the value for a key. Absent keys are `Ok(None)`.
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Writes the value for a key, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Deletes a key. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> StorageResult<()>;
}

/// In-memory backend: a HashMap behind a lock.
///
/// The default for tests and for sessions that do not opt into durable
/// storage.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    data: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.data.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.data
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        self.data.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mockall::mock! {
    pub Backend {}

    #[async_trait]
    impl StorageBackend for Backend {
        async fn get(&self, key: &str) -> StorageResult<Option<String>>;
        async fn set(&self, key: &str, value: &str) -> StorageResult<()>;
        async fn remove(&self, key: &str) -> StorageResult<()>;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_backend_round_trip() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.get("missing").await.unwrap(), None);

        backend.set("key", "value").await.unwrap();
        assert_eq!(backend.get("key").await.unwrap().as_deref(), Some("value"));

        backend.set("key", "replaced").await.unwrap();
        assert_eq!(
            backend.get("key").await.unwrap().as_deref(),
            Some("replaced")
        );

        backend.remove("key").await.unwrap();
        assert_eq!(backend.get("key").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_backend_remove_absent_key_is_ok() {
        let backend = MemoryBackend::new();
        backend.remove("never-set").await.unwrap();
    }
}
