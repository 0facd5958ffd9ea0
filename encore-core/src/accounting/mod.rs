//! Stream accounting and referral bonus propagation
//!
//! One accounting update takes a listener's fresh play history, extracts
//! the qualifying plays, deduplicates them against everything already on
//! record, and feeds the count of genuinely new plays into the referral
//! bonus ledger. New-vs-total is the load-bearing distinction: merging
//! first and diffing lengths over-credits the referrer on overlapping
//! polls.

mod dedup;
mod filter;
mod referral;
mod service;

use thiserror::Error;

use crate::provider::ProviderError;
use crate::store::StoreError;

pub use dedup::{merge_timestamps, MergeOutcome};
pub use filter::{qualifying_timestamps, TrackedMedia};
pub use referral::propagate_bonus;
pub use service::{AccountingService, ActivitySummary};

/// Errors from an accounting operation
#[derive(Error, Debug)]
pub enum AccountingError {
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("missing required input: {0}")]
    MissingInput(&'static str),

    #[error("not eligible for a referral link: {plays} plays of {required} required")]
    ReferralNotEligible { plays: u64, required: u64 },
}
