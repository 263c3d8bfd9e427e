//! File-backed storage: one JSON document per key on disk.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::backend::StorageBackend;
use crate::error::{StorageError, StorageResult};

/// Stores each key as `{dir}/{key}.json`.
///
/// Writes go through a temp file and a rename, so readers see either the
/// previous document or the complete new one, never a torn write.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Resolves the file path for a key.
    ///
    /// Keys name files directly, so anything that could escape the data
    /// directory is rejected.
    fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(StorageError::invalid_key(key));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }

    async fn ensure_dir(&self) -> StorageResult<()> {
        fs::create_dir_all(&self.dir).await?;
        Ok(())
    }
}

#[async_trait]
impl StorageBackend for FileBackend {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        self.ensure_dir().await?;

        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value).await?;
        fs::rename(&tmp_path, &path).await?;

        debug!(key = %key, bytes = value.len(), "Persisted storage key");
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl AsRef<Path> for FileBackend {
    fn as_ref(&self) -> &Path {
        &self.dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_backend_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path());

        assert_eq!(backend.get("reclip_exports").await.unwrap(), None);

        backend.set("reclip_exports", "[1,2,3]").await.unwrap();
        assert_eq!(
            backend.get("reclip_exports").await.unwrap().as_deref(),
            Some("[1,2,3]")
        );
        assert!(dir.path().join("reclip_exports.json").exists());

        backend.remove("reclip_exports").await.unwrap();
        assert_eq!(backend.get("reclip_exports").await.unwrap(), None);
        backend.remove("reclip_exports").await.unwrap();
    }

    #[tokio::test]
    async fn test_write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path());

        backend.set("reclip_stats", "{}").await.unwrap();
        assert!(!dir.path().join("reclip_stats.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_rejects_keys_that_escape_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path());

        for key in ["../evil", "a/b", "", "a.b"] {
            assert!(matches!(
                backend.get(key).await,
                Err(StorageError::InvalidKey(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_missing_data_dir_is_created_on_first_write() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("nested").join("data"));

        backend.set("reclip_settings", "{}").await.unwrap();
        assert_eq!(
            backend.get("reclip_settings").await.unwrap().as_deref(),
            Some("{}")
        );
    }
}
