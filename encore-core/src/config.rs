//! Engine configuration

use serde::{Deserialize, Serialize};

/// Configuration for the accounting engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Media identifiers whose plays qualify (track ids, or every track
    /// id of a tracked album)
    #[serde(default)]
    pub tracked_media: Vec<String>,

    /// Qualifying plays by a referee per whole bonus unit for the referrer
    #[serde(default = "default_plays_per_bonus_unit")]
    pub plays_per_bonus_unit: u32,

    /// Total plays a listener needs before they may generate a referral
    /// link
    #[serde(default = "default_referral_min_plays")]
    pub referral_min_plays: u64,
}

fn default_plays_per_bonus_unit() -> u32 {
    4
}

fn default_referral_min_plays() -> u64 {
    500
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tracked_media: Vec::new(),
            plays_per_bonus_unit: default_plays_per_bonus_unit(),
            referral_min_plays: default_referral_min_plays(),
        }
    }
}

impl EngineConfig {
    /// Config tracking a single media identifier
    pub fn for_media(media_id: impl Into<String>) -> Self {
        Self {
            tracked_media: vec![media_id.into()],
            ..Self::default()
        }
    }
}
