//! One-shot relocation of inline play-timestamp lists
//!
//! Early records stored the play-timestamp list inline on the listener
//! document; the current layout keeps it under its own `playrecords:{id}`
//! key. This job walks the listener index in bounded batches, relocates
//! each unmigrated list, and is safe to re-run: already-migrated records
//! are skipped and a failed record is logged without aborting the batch.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::listener::ListenerStore;
use crate::store::StoreError;

/// Default records per batch
pub const DEFAULT_BATCH_SIZE: usize = 10;
/// Default pause between batches, to bound load on the store
pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_secs(1);

/// Counts reported by a completed migration run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationReport {
    pub processed: u64,
    pub migrated: u64,
}

/// Batch job relocating inline play records to their own keys
pub struct PlayRecordMigration {
    store: ListenerStore,
    batch_size: usize,
    batch_delay: Duration,
}

impl PlayRecordMigration {
    pub fn new(store: ListenerStore) -> Self {
        Self {
            store,
            batch_size: DEFAULT_BATCH_SIZE,
            batch_delay: DEFAULT_BATCH_DELAY,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn with_batch_delay(mut self, delay: Duration) -> Self {
        self.batch_delay = delay;
        self
    }

    /// Run the migration over every known listener
    pub async fn run(&self) -> Result<MigrationReport, StoreError> {
        let ids = self.store.listener_ids().await?;
        let mut report = MigrationReport {
            processed: 0,
            migrated: 0,
        };

        for id in &ids {
            if let Err(e) = self.migrate_one(id, &mut report).await {
                tracing::warn!(listener = %id, error = %e, "failed to migrate listener");
            }

            report.processed += 1;

            if report.processed % self.batch_size as u64 == 0 {
                tracing::info!(
                    processed = report.processed,
                    migrated = report.migrated,
                    "migration batch complete"
                );
                tokio::time::sleep(self.batch_delay).await;
            }
        }

        tracing::info!(
            processed = report.processed,
            migrated = report.migrated,
            "migration finished"
        );
        Ok(report)
    }

    async fn migrate_one(&self, id: &str, report: &mut MigrationReport) -> Result<(), StoreError> {
        let Some(mut record) = self.store.get_record(id).await? else {
            return Ok(());
        };

        if record.play_records_migrated {
            return Ok(());
        }
        let Some(timestamps) = record.play_timestamps.take() else {
            // Nothing inline to move; flag it so later runs skip the read
            record.play_records_migrated = true;
            self.store.put_record(id, &record).await?;
            return Ok(());
        };

        self.store.put_play_records(id, &timestamps).await?;
        record.play_records_migrated = true;
        self.store.put_record(id, &record).await?;

        report.migrated += 1;
        Ok(())
    }
}
