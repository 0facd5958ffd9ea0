//! Leaderboard ranking over the listener index

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::listener::ListenerStore;
use crate::store::StoreError;

/// Default number of leaderboard entries
pub const DEFAULT_LIMIT: u32 = 25;
/// Hard cap on requested leaderboard size
pub const MAX_LIMIT: u32 = 50;

/// Trailing time window for play counting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Window {
    #[default]
    All,
    Last24h,
    Last7d,
    Last30d,
}

impl Window {
    /// Parse the wire form (`all`, `24h`, `7d`, `30d`); anything else is
    /// treated as all-time
    pub fn parse(s: &str) -> Self {
        match s {
            "24h" => Window::Last24h,
            "7d" => Window::Last7d,
            "30d" => Window::Last30d,
            _ => Window::All,
        }
    }

    /// Cutoff instant for this window, or `None` for all-time
    pub fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Window::All => None,
            Window::Last24h => Some(now - Duration::hours(24)),
            Window::Last7d => Some(now - Duration::days(7)),
            Window::Last30d => Some(now - Duration::days(30)),
        }
    }
}

/// Ranking metric selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankMode {
    #[default]
    Streams,
    Referrals,
}

impl RankMode {
    pub fn parse(s: &str) -> Self {
        match s {
            "referrals" => RankMode::Referrals,
            _ => RankMode::Streams,
        }
    }
}

/// Parameters for one leaderboard request
#[derive(Debug, Clone, Default)]
pub struct LeaderboardQuery {
    pub limit: Option<u32>,
    pub window: Window,
    pub mode: RankMode,
}

impl LeaderboardQuery {
    /// Requested limit clamped to `1..=MAX_LIMIT`
    pub fn effective_limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT) as usize
    }
}

/// One ranked leaderboard row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// 1-based rank after sorting
    pub rank: u32,
    pub wallet_address: String,
    /// Windowed play count plus bonus units, or referral count,
    /// depending on the query's mode
    pub metric: u64,
}

/// Computes ranked views over all known listeners
#[derive(Clone)]
pub struct LeaderboardService {
    store: ListenerStore,
}

impl LeaderboardService {
    pub fn new(store: ListenerStore) -> Self {
        Self { store }
    }

    /// Build the leaderboard for `query`
    pub async fn leaderboard(
        &self,
        query: &LeaderboardQuery,
    ) -> Result<Vec<LeaderboardEntry>, StoreError> {
        self.leaderboard_at(query, Utc::now()).await
    }

    /// Same as [`leaderboard`](Self::leaderboard) with an explicit "now"
    /// (for deterministic window tests)
    pub async fn leaderboard_at(
        &self,
        query: &LeaderboardQuery,
        now: DateTime<Utc>,
    ) -> Result<Vec<LeaderboardEntry>, StoreError> {
        let cutoff = query.window.cutoff(now);
        let ids = self.store.listener_ids().await?;

        let mut rows: Vec<(String, String, u64)> = Vec::with_capacity(ids.len());
        for id in ids {
            let Some(record) = self.store.get_record(&id).await? else {
                continue;
            };

            let metric = match query.mode {
                RankMode::Referrals => record.referral_count,
                RankMode::Streams => {
                    let plays = self.store.play_records(&id).await?;
                    // Bonus units carry no timestamp, so they are never
                    // window-filtered
                    windowed_count(&plays, cutoff) + record.bonus_units
                }
            };

            rows.push((id, record.wallet_address, metric));
        }

        // Descending by metric, listener id ascending as the tiebreak
        rows.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.0.cmp(&b.0)));
        rows.truncate(query.effective_limit());

        Ok(rows
            .into_iter()
            .enumerate()
            .map(|(i, (_, wallet_address, metric))| LeaderboardEntry {
                rank: (i + 1) as u32,
                wallet_address,
                metric,
            })
            .collect())
    }
}

/// Count timestamps strictly after `cutoff`; unparseable timestamps are
/// skipped for windowed counts and included for all-time
fn windowed_count(timestamps: &[String], cutoff: Option<DateTime<Utc>>) -> u64 {
    match cutoff {
        None => timestamps.len() as u64,
        Some(cutoff) => timestamps
            .iter()
            .filter(|ts| {
                DateTime::parse_from_rfc3339(ts)
                    .map(|parsed| parsed.with_timezone(&Utc) > cutoff)
                    .unwrap_or(false)
            })
            .count() as u64,
    }
}
