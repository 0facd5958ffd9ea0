//! encore-core: stream-accounting and referral-bonus engine
//!
//! This crate provides the foundational components for encore:
//!
//! - **Accounting** - [`AccountingService`] deduplicates qualifying play
//!   events into per-listener totals and propagates fractional referral
//!   bonuses
//! - **Leaderboard** - [`LeaderboardService`] ranks listeners over a time
//!   window by plays or referrals
//! - **Store** - [`KvStore`] key-value persistence with memory and file
//!   implementations
//! - **Provider** - [`StreamingProvider`] collaborator for identity
//!   resolution and play history, with Spotify and mock implementations
//! - **Migration** - [`PlayRecordMigration`] batch relocation of legacy
//!   inline play records

pub mod accounting;
pub mod config;
pub mod error;
pub mod leaderboard;
pub mod listener;
pub mod migration;
pub mod provider;
pub mod store;

// Re-export key types for convenience
pub use accounting::{
    merge_timestamps, qualifying_timestamps, AccountingError, AccountingService, ActivitySummary,
    MergeOutcome, TrackedMedia,
};
pub use config::EngineConfig;
pub use error::EncoreError;
pub use leaderboard::{
    LeaderboardEntry, LeaderboardQuery, LeaderboardService, RankMode, Window,
};
pub use listener::{ListenerRecord, ListenerStore, ReferralState};
pub use migration::{MigrationReport, PlayRecordMigration};
pub use provider::{MockProvider, PlayEvent, ProviderError, SpotifyProvider, StreamingProvider};
pub use store::{FileKvStore, KvStore, MemoryKvStore, StoreError};
