//! State Store Implementations
//!
//! [`StateStoreProvider`] implementations used to persist resolution
//! feedback and encrypted adapter credentials (the only durable state this
//! service keeps outside of adapter/cache snapshots).

use async_trait::async_trait;
use runbook_domain::error::{Error, Result};
use runbook_domain::ports::infrastructure::StateStoreProvider;
use std::path::PathBuf;
use tokio::fs;

/// File-backed key-value state store
///
/// Each key is written as one file under `directory`, named by a hex-encoded
/// hash of the key so arbitrary key strings (including `:`-separated
/// composite ids) are always valid filenames.
pub struct FileStateStoreProvider {
    directory: PathBuf,
}

impl FileStateStoreProvider {
    /// Build a store rooted at `directory`, creating it if necessary is the
    /// caller's responsibility via [`Self::ensure_directory`]
    pub fn new(directory: PathBuf) -> Self {
        Self { directory }
    }

    /// Create the backing directory if it does not already exist
    pub async fn ensure_directory(&self) -> Result<()> {
        fs::create_dir_all(&self.directory)
            .await
            .map_err(|e| Error::io_with_source("create state store directory", e))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(key.as_bytes());
        let digest = hasher.finalize();
        self.directory.join(hex::encode(digest))
    }
}

#[async_trait]
impl StateStoreProvider for FileStateStoreProvider {
    async fn save(&self, key: &str, data: &[u8]) -> Result<()> {
        fs::write(self.path_for(key), data)
            .await
            .map_err(|e| Error::io_with_source(format!("save state key '{key}'"), e))
    }

    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match fs::read(self.path_for(key)).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::io_with_source(format!("load state key '{key}'"), e)),
        }
    }

    async fn delete(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::io_with_source(format!("delete state key '{key}'"), e)),
        }
    }
}

/// In-memory state store, for tests and ephemeral deployments
#[derive(Default)]
pub struct InMemoryStateStoreProvider {
    entries: dashmap::DashMap<String, Vec<u8>>,
}

impl InMemoryStateStoreProvider {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StateStoreProvider for InMemoryStateStoreProvider {
    async fn save(&self, key: &str, data: &[u8]) -> Result<()> {
        self.entries.insert(key.to_string(), data.to_vec());
        Ok(())
    }

    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.get(key).map(|v| v.clone()))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn roundtrips_through_save_load_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStateStoreProvider::new(dir.path().to_path_buf());
        store.ensure_directory().await.unwrap();

        store.save("feedback:runbook-1:step-1", b"payload").await.unwrap();
        let loaded = store.load("feedback:runbook-1:step-1").await.unwrap();
        assert_eq!(loaded, Some(b"payload".to_vec()));

        store.delete("feedback:runbook-1:step-1").await.unwrap();
        assert_eq!(store.load("feedback:runbook-1:step-1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn missing_key_loads_none() {
        let store = InMemoryStateStoreProvider::new();
        assert_eq!(store.load("nope").await.unwrap(), None);
    }
}
