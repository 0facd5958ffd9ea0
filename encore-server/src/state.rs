//! Shared application state for the encore server

use std::sync::Arc;

use chrono::{DateTime, Utc};
use encore_core::{
    AccountingService, EngineConfig, KvStore, LeaderboardService, ListenerStore, StreamingProvider,
};

/// Shared application state accessible by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Accounting engine
    pub accounting: Arc<AccountingService>,
    /// Leaderboard queries
    pub leaderboard: LeaderboardService,
    /// Listener store, used directly by the migration endpoint
    pub listeners: ListenerStore,
    /// When the server started
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Assemble state over a store and streaming provider
    pub fn new(
        kv: Arc<dyn KvStore>,
        provider: Arc<dyn StreamingProvider>,
        config: EngineConfig,
    ) -> Self {
        let listeners = ListenerStore::new(kv);
        let accounting = Arc::new(AccountingService::new(
            listeners.clone(),
            provider,
            config,
        ));
        let leaderboard = LeaderboardService::new(listeners.clone());

        Self {
            accounting,
            leaderboard,
            listeners,
            started_at: Utc::now(),
        }
    }

    /// Returns how long the server has been running
    pub fn uptime_seconds(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}
