//! StreamingProvider trait and play-event types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::ProviderError;

/// A single play event from the provider's recent-history feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayEvent {
    /// Provider identifier of the played media (track id)
    pub media_id: String,
    /// RFC 3339 timestamp of the play
    pub played_at: String,
}

impl PlayEvent {
    pub fn new(media_id: impl Into<String>, played_at: impl Into<String>) -> Self {
        Self {
            media_id: media_id.into(),
            played_at: played_at.into(),
        }
    }
}

/// Trait for streaming-service collaborators
///
/// Implementations handle identity resolution and play-history retrieval
/// against the actual provider API; [`super::MockProvider`] scripts both
/// for tests.
#[async_trait]
pub trait StreamingProvider: Send + Sync {
    /// Resolve an access token to the provider's stable listener identifier
    async fn resolve_listener(&self, token: &str) -> Result<String, ProviderError>;

    /// Fetch the listener's recently played items
    async fn recent_plays(&self, token: &str) -> Result<Vec<PlayEvent>, ProviderError>;
}
