//! File store backend
//!
//! Persists the whole key space as a single JSON object on disk.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;

use crate::error::StoreResult;
use crate::store::KeyValueStore;

type KeySpace = BTreeMap<String, String>;

// == File Store ==
/// Persistent store backed by one JSON file.
///
/// Reads and writes go through a single lock, so every read-modify-write
/// cycle is atomic with respect to other callers of the same instance.
/// Writes replace the file through a temporary sibling and a rename.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    // == Constructor ==
    /// Creates a store persisting to `path`. The file is created lazily on
    /// first write; a missing file reads as an empty store.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> StoreResult<KeySpace> {
        match fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(KeySpace::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(KeySpace::new()),
            Err(err) => Err(err.into()),
        }
    }

    async fn persist(&self, entries: &KeySpace) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string(entries)?;
        let tmp = self.temp_path();
        fs::write(&tmp, json).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    /// Sibling used for atomic replacement: the full file name plus `.tmp`,
    /// so distinct store files never share a temporary.
    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    /// Applies `change` to the stored key space and writes it back.
    async fn update<F>(&self, change: F) -> StoreResult<()>
    where
        F: FnOnce(&mut KeySpace) + Send,
    {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await?;
        change(&mut entries);
        self.persist(&entries).await
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let (key, value) = (key.to_string(), value.to_string());
        self.update(move |entries| {
            entries.insert(key, value);
        })
        .await
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        self.update(|entries| {
            entries.remove(key);
        })
        .await
    }

    async fn list_keys(&self) -> StoreResult<Vec<String>> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.into_keys().collect())
    }

    async fn remove_many(&self, keys: &[String]) -> StoreResult<()> {
        self.update(|entries| {
            for key in keys {
                entries.remove(key);
            }
        })
        .await
    }
}
