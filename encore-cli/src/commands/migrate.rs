//! Migrate command for relocating legacy inline play records

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;

use encore_core::{FileKvStore, ListenerStore, PlayRecordMigration};

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Path to the JSON store file
    #[arg(long, default_value = "encore-store.json")]
    pub store: PathBuf,

    /// Records per batch
    #[arg(long, default_value_t = encore_core::migration::DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,
}

/// Run the migrate command
pub async fn run(args: MigrateArgs) -> Result<()> {
    let kv = Arc::new(FileKvStore::load(&args.store).await?);
    let store = ListenerStore::new(kv);

    let migration = PlayRecordMigration::new(store).with_batch_size(args.batch_size);
    let report = migration.run().await?;

    println!(
        "Migration completed: processed {}, migrated {}",
        report.processed, report.migrated
    );
    Ok(())
}
