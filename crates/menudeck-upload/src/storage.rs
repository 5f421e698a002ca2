//! Key-value persistence for upload history
//!
//! [`JsonFileStore`] keeps every key in one JSON object on disk. A missing
//! file reads as empty.

use crate::error::UploadError;
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// # Errors
    /// Returns an error if the backing storage cannot be read
    async fn get(&self, key: &str) -> Result<Option<Value>, UploadError>;

    /// # Errors
    /// Returns an error if the backing storage cannot be written
    async fn set(&self, key: &str, value: Value) -> Result<(), UploadError>;
}

/// Process-local store, lost on exit
#[derive(Debug, Default)]
pub struct InMemoryStore {
    values: RwLock<HashMap<String, Value>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, UploadError> {
        Ok(self.values.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), UploadError> {
        self.values.write().insert(key.to_string(), value);
        Ok(())
    }
}

/// Single JSON document on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Map<String, Value>, UploadError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(Map::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Map::new()),
            Err(e) => Err(UploadError::storage(&self.path, e)),
        }
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, UploadError> {
        Ok(self.read_all().await?.remove(key))
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), UploadError> {
        let mut all = self.read_all().await?;
        all.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| UploadError::storage(parent, e))?;
        }
        let content = serde_json::to_string_pretty(&all)?;
        tokio::fs::write(&self.path, content)
            .await
            .map_err(|e| UploadError::storage(&self.path, e))?;
        tracing::debug!(path = %self.path.display(), key, "stored value");
        Ok(())
    }
}

/// Store whose writes always fail
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct ReadOnlyStore;

#[cfg(test)]
#[async_trait]
impl KeyValueStore for ReadOnlyStore {
    async fn get(&self, _key: &str) -> Result<Option<Value>, UploadError> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: Value) -> Result<(), UploadError> {
        Err(UploadError::storage(
            "read-only",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only store"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("state.json"));
        assert_eq!(store.get("bulkUploadHistory").await.unwrap(), None);
    }

    #[tokio::test]
    async fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let store = JsonFileStore::new(&path);
        store.set("a", json!([1, 2])).await.unwrap();
        store.set("b", json!("x")).await.unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.get("a").await.unwrap(), Some(json!([1, 2])));
        assert_eq!(reopened.get("b").await.unwrap(), Some(json!("x")));
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = JsonFileStore::new(&path).get("a").await.unwrap_err();
        assert!(matches!(err, UploadError::Serialization(_)));
    }
}
