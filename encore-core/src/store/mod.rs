//! Key-value document store abstraction
//!
//! The engine persists everything through plain get/set-by-key semantics:
//! no query language, no transactions. [`MemoryKvStore`] backs tests and
//! ephemeral deployments; [`FileKvStore`] persists the key map to a single
//! JSON file.

mod file;
mod memory;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use file::FileKvStore;
pub use memory::MemoryKvStore;

/// Errors from the key-value store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage read failed: {0}")]
    Read(String),

    #[error("storage write failed: {0}")]
    Write(String),

    #[error("storage serialization failed: {0}")]
    Serialize(String),
}

/// Document-level key-value store
///
/// Implementations must tolerate concurrent callers; each `set` is an
/// independent last-write-wins replacement of the value under `key`.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Fetch the value stored under `key`, if any
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Replace the value stored under `key`
    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;
}
