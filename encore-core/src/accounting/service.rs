//! Accounting service: orchestrates one stream-accounting update

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::listener::{ListenerRecord, ListenerStore};
use crate::provider::StreamingProvider;

use super::dedup::merge_timestamps;
use super::filter::{qualifying_timestamps, TrackedMedia};
use super::referral::propagate_bonus;
use super::AccountingError;

/// Result of a completed accounting update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivitySummary {
    pub total_plays: u64,
    pub bonus_units: u64,
    pub referral_count: u64,
}

/// Service for recording stream activity and referral state
///
/// Each update is an independent read-modify-write against the store: all
/// reads needed for the decision happen before any write, so a failed
/// store operation aborts the update with prior persisted state untouched.
pub struct AccountingService {
    store: ListenerStore,
    provider: Arc<dyn StreamingProvider>,
    config: EngineConfig,
    tracked: TrackedMedia,
}

impl AccountingService {
    pub fn new(
        store: ListenerStore,
        provider: Arc<dyn StreamingProvider>,
        config: EngineConfig,
    ) -> Self {
        let tracked = TrackedMedia::new(config.tracked_media.iter().cloned());
        Self {
            store,
            provider,
            config,
            tracked,
        }
    }

    pub fn store(&self) -> &ListenerStore {
        &self.store
    }

    /// Record a listener's fresh stream activity
    ///
    /// Resolves the token, filters and deduplicates the recent play
    /// history, binds a referral if a valid code is supplied for an
    /// unbound listener, and credits the referrer's bonus for new plays.
    /// Unresolvable and self referral codes are ignored; a missing
    /// referrer record never fails the update.
    pub async fn record_stream_activity(
        &self,
        token: &str,
        wallet_address: &str,
        referral_code: Option<&str>,
    ) -> Result<ActivitySummary, AccountingError> {
        if token.is_empty() {
            return Err(AccountingError::MissingInput("listener token"));
        }
        if wallet_address.is_empty() {
            return Err(AccountingError::MissingInput("wallet address"));
        }

        let listener_id = self.provider.resolve_listener(token).await?;
        let events = self.provider.recent_plays(token).await?;
        let candidates = qualifying_timestamps(&events, &self.tracked);

        let existing = self.store.play_records(&listener_id).await?;
        let outcome = merge_timestamps(&existing, &candidates);

        let mut record = match self.store.get_record(&listener_id).await? {
            Some(mut record) => {
                record.wallet_address = wallet_address.to_string();
                record
            }
            None => {
                tracing::info!(listener = %listener_id, "creating listener record");
                ListenerRecord::new(wallet_address)
            }
        };

        // One slot: either the binding increments the referrer's referral
        // count, or propagation credits their bonus. Never both in the
        // same update, since plays present at binding time do not count.
        let mut referrer_update: Option<(String, ListenerRecord)> = None;
        let mut bound_this_update = false;

        if let Some(code) = referral_code.filter(|code| !code.is_empty()) {
            if !record.referral.is_bound() {
                if code == listener_id {
                    tracing::debug!(listener = %listener_id, "ignoring self-referral code");
                } else if let Some(mut referrer) = self.store.get_record(code).await? {
                    if record.referral.bind(&listener_id, code, outcome.total()) {
                        referrer.referral_count += 1;
                        tracing::info!(
                            listener = %listener_id,
                            referrer = %code,
                            "referral bound"
                        );
                        referrer_update = Some((code.to_string(), referrer));
                        bound_this_update = true;
                    }
                } else {
                    tracing::debug!(code = %code, "ignoring unresolvable referral code");
                }
            }
        }

        if !bound_this_update && outcome.new_count() > 0 {
            if let Some(referrer_id) = record.referral.referrer_id().map(str::to_string) {
                if referrer_id == listener_id {
                    // Legacy data only; bind() refuses self-referral
                    tracing::warn!(listener = %listener_id, "skipping self-referential bonus");
                } else if let Some(mut referrer) = self.store.get_record(&referrer_id).await? {
                    let awarded = propagate_bonus(
                        &mut referrer,
                        &listener_id,
                        outcome.new_count(),
                        self.config.plays_per_bonus_unit,
                    );
                    tracing::debug!(
                        referrer = %referrer_id,
                        referee = %listener_id,
                        new_plays = outcome.new_count(),
                        awarded,
                        "propagated referral bonus"
                    );
                    referrer_update = Some((referrer_id, referrer));
                } else {
                    tracing::warn!(
                        referrer = %referrer_id,
                        "referrer record missing, skipping bonus propagation"
                    );
                }
            }
        }

        record.total_plays = outcome.total();
        // Updates always land on the keyed play-record layout
        record.play_timestamps = None;
        record.play_records_migrated = true;

        if let Some((referrer_id, referrer)) = referrer_update {
            self.store.put_record(&referrer_id, &referrer).await?;
        }
        self.store
            .put_play_records(&listener_id, &outcome.merged)
            .await?;
        self.store.put_record(&listener_id, &record).await?;
        self.store.register_listener(&listener_id).await?;

        Ok(ActivitySummary {
            total_plays: record.total_plays,
            bonus_units: record.bonus_units,
            referral_count: record.referral_count,
        })
    }

    /// Read-only total play count for the listener behind `token`
    pub async fn stream_count(&self, token: &str) -> Result<u64, AccountingError> {
        if token.is_empty() {
            return Err(AccountingError::MissingInput("listener token"));
        }
        let listener_id = self.provider.resolve_listener(token).await?;
        let record = self.store.get_record(&listener_id).await?;
        Ok(record.map(|r| r.total_plays).unwrap_or(0))
    }

    /// Generate a referral link for an eligible listener
    ///
    /// Eligibility requires at least `referral_min_plays` recorded plays.
    pub async fn referral_link(
        &self,
        token: &str,
        base_url: &str,
    ) -> Result<String, AccountingError> {
        if token.is_empty() {
            return Err(AccountingError::MissingInput("listener token"));
        }
        if base_url.is_empty() {
            return Err(AccountingError::MissingInput("base url"));
        }

        let listener_id = self.provider.resolve_listener(token).await?;
        let plays = self
            .store
            .get_record(&listener_id)
            .await?
            .map(|r| r.total_plays)
            .unwrap_or(0);

        if plays < self.config.referral_min_plays {
            return Err(AccountingError::ReferralNotEligible {
                plays,
                required: self.config.referral_min_plays,
            });
        }

        Ok(format!("{}?ref={}", base_url, listener_id))
    }
}
