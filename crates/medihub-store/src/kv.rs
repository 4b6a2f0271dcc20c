//! In-memory key-value store with JSON values.

use std::collections::HashMap;
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use crate::StoreError;

/// Key-value store holding JSON documents.
///
/// Values are serialized on `set` and deserialized on `get`, so callers
/// always work with owned copies. [`KvStore::update`] runs a
/// read-modify-write under a single write lock.
#[derive(Debug, Default)]
pub struct KvStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl KvStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a value. Returns `None` if the key doesn't exist.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some(value) => Ok(Some(T::deserialize(value)?)),
            None => Ok(None),
        }
    }

    /// Set a value, replacing any existing one.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let value = serde_json::to_value(value)?;
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    /// Set a value only if the key is absent. Returns whether it was set.
    pub async fn set_if_absent<T: Serialize>(&self, key: &str, value: &T) -> Result<bool, StoreError> {
        let mut entries = self.entries.write().await;
        if entries.contains_key(key) {
            return Ok(false);
        }
        entries.insert(key.to_string(), serde_json::to_value(value)?);
        Ok(true)
    }

    /// Delete a value. Deleting a missing key is not an error.
    pub async fn delete(&self, key: &str) {
        self.entries.write().await.remove(key);
    }

    /// Read, modify and write back a value under one lock.
    ///
    /// A missing key starts from `T::default()`. The value is written back
    /// only if `f` succeeds.
    pub async fn update<T, R, E, F>(&self, key: &str, f: F) -> Result<R, E>
    where
        T: Serialize + DeserializeOwned + Default,
        F: FnOnce(&mut T) -> Result<R, E>,
        E: From<StoreError>,
    {
        let mut entries = self.entries.write().await;
        let mut value: T = match entries.get(key) {
            Some(raw) => T::deserialize(raw).map_err(StoreError::from)?,
            None => T::default(),
        };

        let result = f(&mut value)?;
        let raw = serde_json::to_value(&value).map_err(StoreError::from)?;
        entries.insert(key.to_string(), raw);
        Ok(result)
    }

    /// Load a store from a JSON snapshot file.
    pub async fn load_snapshot(path: &Path) -> Result<Self, StoreError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| StoreError::Snapshot {
            path: path.to_path_buf(),
            source,
        })?;
        let entries: HashMap<String, Value> = serde_json::from_slice(&bytes)?;
        debug!(path = %path.display(), keys = entries.len(), "loaded snapshot");
        Ok(Self {
            entries: RwLock::new(entries),
        })
    }

    /// Write every entry to a JSON snapshot file.
    pub async fn save_snapshot(&self, path: &Path) -> Result<(), StoreError> {
        let bytes = {
            let entries = self.entries.read().await;
            serde_json::to_vec_pretty(&*entries)?
        };
        tokio::fs::write(path, bytes)
            .await
            .map_err(|source| StoreError::Snapshot {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), "saved snapshot");
        Ok(())
    }
}
