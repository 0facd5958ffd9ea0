//! Listener record persistence over the key-value store
//!
//! Layout: one `listener:{id}` document per listener, play timestamps in a
//! separate `playrecords:{id}` document, and a flat `listeners` index of
//! known ids for leaderboard scans. Per-listener keys confine write races
//! to updates for the same listener.

use std::sync::Arc;

use crate::store::{KvStore, StoreError};

use super::types::ListenerRecord;

const INDEX_KEY: &str = "listeners";

fn listener_key(id: &str) -> String {
    format!("listener:{}", id)
}

fn play_records_key(id: &str) -> String {
    format!("playrecords:{}", id)
}

/// Adapter exposing typed listener-record operations over a [`KvStore`]
#[derive(Clone)]
pub struct ListenerStore {
    kv: Arc<dyn KvStore>,
}

impl ListenerStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    /// Fetch a listener's record
    pub async fn get_record(&self, id: &str) -> Result<Option<ListenerRecord>, StoreError> {
        match self.kv.get(&listener_key(id)).await? {
            Some(value) => {
                let record = serde_json::from_value(value)
                    .map_err(|e| StoreError::Serialize(format!("listener {}: {}", id, e)))?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    /// Persist a listener's record
    pub async fn put_record(&self, id: &str, record: &ListenerRecord) -> Result<(), StoreError> {
        let value = serde_json::to_value(record)
            .map_err(|e| StoreError::Serialize(e.to_string()))?;
        self.kv.set(&listener_key(id), value).await
    }

    /// Load a listener's full play-timestamp list
    ///
    /// Prefers the keyed `playrecords:{id}` document; records that predate
    /// the migration still carry the list inline, so fall back to it.
    pub async fn play_records(&self, id: &str) -> Result<Vec<String>, StoreError> {
        if let Some(value) = self.kv.get(&play_records_key(id)).await? {
            let records = serde_json::from_value(value)
                .map_err(|e| StoreError::Serialize(format!("playrecords {}: {}", id, e)))?;
            return Ok(records);
        }

        match self.get_record(id).await? {
            Some(record) => Ok(record.play_timestamps.unwrap_or_default()),
            None => Ok(Vec::new()),
        }
    }

    /// Persist a listener's full play-timestamp list under its own key
    pub async fn put_play_records(&self, id: &str, records: &[String]) -> Result<(), StoreError> {
        let value = serde_json::to_value(records)
            .map_err(|e| StoreError::Serialize(e.to_string()))?;
        self.kv.set(&play_records_key(id), value).await
    }

    /// All known listener ids
    pub async fn listener_ids(&self) -> Result<Vec<String>, StoreError> {
        match self.kv.get(INDEX_KEY).await? {
            Some(value) => serde_json::from_value(value)
                .map_err(|e| StoreError::Serialize(format!("listener index: {}", e))),
            None => Ok(Vec::new()),
        }
    }

    /// Add an id to the listener index if not already present
    pub async fn register_listener(&self, id: &str) -> Result<(), StoreError> {
        let mut ids = self.listener_ids().await?;
        if ids.iter().any(|existing| existing == id) {
            return Ok(());
        }
        ids.push(id.to_string());
        let value = serde_json::to_value(&ids)
            .map_err(|e| StoreError::Serialize(e.to_string()))?;
        self.kv.set(INDEX_KEY, value).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryKvStore;

    fn test_store() -> ListenerStore {
        ListenerStore::new(Arc::new(MemoryKvStore::new()))
    }

    #[tokio::test]
    async fn test_record_roundtrip() {
        let store = test_store();
        let record = ListenerRecord::new("wallet-1");

        store.put_record("l1", &record).await.unwrap();
        let loaded = store.get_record("l1").await.unwrap().unwrap();
        assert_eq!(loaded, record);
    }

    #[tokio::test]
    async fn test_missing_record_is_none() {
        let store = test_store();
        assert!(store.get_record("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_play_records_prefer_keyed_document() {
        let store = test_store();

        let mut record = ListenerRecord::new("w");
        record.play_timestamps = Some(vec!["legacy".into()]);
        record.play_records_migrated = false;
        store.put_record("l1", &record).await.unwrap();

        store
            .put_play_records("l1", &["keyed".to_string()])
            .await
            .unwrap();

        let records = store.play_records("l1").await.unwrap();
        assert_eq!(records, vec!["keyed".to_string()]);
    }

    #[tokio::test]
    async fn test_play_records_fall_back_to_inline() {
        let store = test_store();

        let mut record = ListenerRecord::new("w");
        record.play_timestamps = Some(vec!["t1".into(), "t2".into()]);
        record.play_records_migrated = false;
        store.put_record("l1", &record).await.unwrap();

        let records = store.play_records("l1").await.unwrap();
        assert_eq!(records.len(), 2);
    }

    #[tokio::test]
    async fn test_play_records_empty_for_unknown_listener() {
        let store = test_store();
        assert!(store.play_records("ghost").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_register_listener_deduplicates() {
        let store = test_store();

        store.register_listener("l1").await.unwrap();
        store.register_listener("l2").await.unwrap();
        store.register_listener("l1").await.unwrap();

        let ids = store.listener_ids().await.unwrap();
        assert_eq!(ids, vec!["l1".to_string(), "l2".to_string()]);
    }
}
