//! JSON-file-backed key-value store

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;
use tokio::sync::RwLock;

use super::{KvStore, StoreError};

/// File-backed implementation of [`KvStore`]
///
/// Holds the full key map in memory and rewrites the backing file on every
/// `set`. Suited to the small single-node deployments this engine targets.
#[derive(Debug)]
pub struct FileKvStore {
    entries: RwLock<HashMap<String, Value>>,
    file_path: PathBuf,
}

impl FileKvStore {
    /// Load the store from `path`, or start empty if the file is missing
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let file_path = path.as_ref().to_path_buf();

        let entries = if file_path.exists() {
            let content = fs::read_to_string(&file_path)
                .await
                .map_err(|e| StoreError::Read(format!("failed to read {}: {}", file_path.display(), e)))?;
            // A corrupt file must not be treated as empty: the next set()
            // would rewrite it and destroy every record it held
            serde_json::from_str(&content).map_err(|e| {
                StoreError::Read(format!("failed to parse {}: {}", file_path.display(), e))
            })?
        } else {
            HashMap::new()
        };

        Ok(Self {
            entries: RwLock::new(entries),
            file_path,
        })
    }

    async fn persist(&self) -> Result<(), StoreError> {
        let entries = self.entries.read().await;

        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Write(format!("failed to create store dir: {}", e)))?;
        }

        let content = serde_json::to_string_pretty(&*entries)
            .map_err(|e| StoreError::Serialize(e.to_string()))?;

        fs::write(&self.file_path, content)
            .await
            .map_err(|e| StoreError::Write(format!("failed to write {}: {}", self.file_path.display(), e)))?;

        Ok(())
    }
}

#[async_trait]
impl KvStore for FileKvStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        {
            let mut entries = self.entries.write().await;
            entries.insert(key.to_string(), value);
        }
        self.persist().await
    }
}
