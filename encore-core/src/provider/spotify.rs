//! Spotify Web API provider

use async_trait::async_trait;
use serde::Deserialize;

use super::error::ProviderError;
use super::traits::{PlayEvent, StreamingProvider};

/// Default Spotify Web API base URL
const SPOTIFY_API_BASE: &str = "https://api.spotify.com/v1";

/// Page size for the recently-played feed (Spotify's maximum)
const RECENTLY_PLAYED_LIMIT: u32 = 50;

/// [`StreamingProvider`] backed by the Spotify Web API
///
/// Consumes a caller-supplied bearer token; token issuance and refresh
/// belong to the surrounding system.
pub struct SpotifyProvider {
    base_url: String,
    http_client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct UserProfile {
    id: String,
}

#[derive(Debug, Deserialize)]
struct RecentlyPlayedResponse {
    #[serde(default)]
    items: Vec<RecentlyPlayedItem>,
}

#[derive(Debug, Deserialize)]
struct RecentlyPlayedItem {
    track: Track,
    played_at: String,
}

#[derive(Debug, Deserialize)]
struct Track {
    id: String,
}

impl SpotifyProvider {
    pub fn new() -> Self {
        Self::with_base_url(SPOTIFY_API_BASE)
    }

    /// Create a provider against a custom base URL (for testing)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http_client: reqwest::Client::new(),
        }
    }

    async fn get_authed(&self, path: &str, token: &str) -> Result<reqwest::Response, ProviderError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http_client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ProviderError::Upstream(e.to_string()))?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ProviderError::Auth("access token rejected".to_string()));
        }
        if !response.status().is_success() {
            return Err(ProviderError::Upstream(format!(
                "HTTP {}: {}",
                response.status(),
                url
            )));
        }

        Ok(response)
    }
}

impl Default for SpotifyProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StreamingProvider for SpotifyProvider {
    async fn resolve_listener(&self, token: &str) -> Result<String, ProviderError> {
        let profile: UserProfile = self
            .get_authed("/me", token)
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::Upstream(e.to_string()))?;

        Ok(profile.id)
    }

    async fn recent_plays(&self, token: &str) -> Result<Vec<PlayEvent>, ProviderError> {
        let path = format!("/me/player/recently-played?limit={}", RECENTLY_PLAYED_LIMIT);
        let recent: RecentlyPlayedResponse = self
            .get_authed(&path, token)
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::Upstream(e.to_string()))?;

        Ok(recent
            .items
            .into_iter()
            .map(|item| PlayEvent {
                media_id: item.track.id,
                played_at: item.played_at,
            })
            .collect())
    }
}
