//! Listener record types

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Referral binding state of a listener
///
/// The only legal transition is `Unbound -> Bound`, performed by
/// [`ReferralState::bind`]; once bound the referrer is never reassigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ReferralState {
    #[default]
    Unbound,
    Bound {
        /// Identifier of the listener who referred this one
        referrer_id: String,
        /// Total plays already on record when the binding fired; plays up
        /// to this point never count toward the referrer's bonus
        plays_at_binding: u64,
    },
}

impl ReferralState {
    /// Attempt the `Unbound -> Bound` transition
    ///
    /// Returns `true` if the binding fired. A second call, or a call with
    /// `referrer_id == listener_id`, leaves the state untouched.
    pub fn bind(&mut self, listener_id: &str, referrer_id: &str, plays_at_binding: u64) -> bool {
        if !matches!(self, ReferralState::Unbound) {
            return false;
        }
        if referrer_id.is_empty() || referrer_id == listener_id {
            return false;
        }
        *self = ReferralState::Bound {
            referrer_id: referrer_id.to_string(),
            plays_at_binding,
        };
        true
    }

    /// The bound referrer id, if any
    pub fn referrer_id(&self) -> Option<&str> {
        match self {
            ReferralState::Unbound => None,
            ReferralState::Bound { referrer_id, .. } => Some(referrer_id),
        }
    }

    pub fn is_bound(&self) -> bool {
        matches!(self, ReferralState::Bound { .. })
    }
}

/// Per-listener accounting record, keyed by the provider's stable
/// listener identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListenerRecord {
    /// External payment-identity string; overwritten on every update
    pub wallet_address: String,

    /// Cardinality of the persisted play-timestamp set; recomputed on
    /// every update, never independently mutated
    #[serde(default)]
    pub total_plays: u64,

    /// Whole bonus credits earned for being a referrer; only increases
    #[serde(default)]
    pub bonus_units: u64,

    /// Per-referee fractional carry toward the next bonus unit, keyed by
    /// the referee's listener id; each value stays in [0, 1)
    #[serde(default)]
    pub fractional_remainders: HashMap<String, f64>,

    /// Referral binding state
    #[serde(default)]
    pub referral: ReferralState,

    /// Number of distinct listeners this listener has referred
    #[serde(default)]
    pub referral_count: u64,

    /// Legacy inline timestamp list; present only on records that predate
    /// the separately keyed play-record layout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_timestamps: Option<Vec<String>>,

    /// Set once the inline list has been relocated to its own key
    #[serde(default)]
    pub play_records_migrated: bool,
}

impl ListenerRecord {
    /// Fresh record for a first-time listener
    pub fn new(wallet_address: impl Into<String>) -> Self {
        Self {
            wallet_address: wallet_address.into(),
            total_plays: 0,
            bonus_units: 0,
            fractional_remainders: HashMap::new(),
            referral: ReferralState::Unbound,
            referral_count: 0,
            play_timestamps: None,
            // New records are born on the keyed layout
            play_records_migrated: true,
        }
    }
}
