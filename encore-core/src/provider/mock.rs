//! Mock provider for testing
//!
//! Register token→listener identities up front and queue play batches;
//! each `recent_plays` call consumes one queued batch. An empty queue
//! yields an empty history, which keeps repeated-poll tests terse.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use super::error::ProviderError;
use super::traits::{PlayEvent, StreamingProvider};

/// Scripted implementation of [`StreamingProvider`] for tests
#[derive(Default)]
pub struct MockProvider {
    identities: Mutex<HashMap<String, String>>,
    play_batches: Mutex<VecDeque<Vec<PlayEvent>>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `token` to `listener_id`; unregistered tokens fail with Auth
    pub fn register_identity(&self, token: impl Into<String>, listener_id: impl Into<String>) {
        let mut identities = self.identities.lock().unwrap();
        identities.insert(token.into(), listener_id.into());
    }

    /// Queue a play batch to be returned by the next `recent_plays` call
    pub fn queue_plays(&self, events: Vec<PlayEvent>) {
        let mut batches = self.play_batches.lock().unwrap();
        batches.push_back(events);
    }
}

#[async_trait]
impl StreamingProvider for MockProvider {
    async fn resolve_listener(&self, token: &str) -> Result<String, ProviderError> {
        let identities = self.identities.lock().unwrap();
        identities
            .get(token)
            .cloned()
            .ok_or_else(|| ProviderError::Auth(format!("unknown token: {}", token)))
    }

    async fn recent_plays(&self, _token: &str) -> Result<Vec<PlayEvent>, ProviderError> {
        let mut batches = self.play_batches.lock().unwrap();
        Ok(batches.pop_front().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_token_is_auth_error() {
        let provider = MockProvider::new();
        let err = provider.resolve_listener("nope").await.unwrap_err();
        assert!(err.is_auth());
    }

    #[tokio::test]
    async fn test_registered_identity_resolves() {
        let provider = MockProvider::new();
        provider.register_identity("tok", "listener-1");

        let id = provider.resolve_listener("tok").await.unwrap();
        assert_eq!(id, "listener-1");
    }

    #[tokio::test]
    async fn test_queued_batches_consumed_in_order() {
        let provider = MockProvider::new();
        provider.queue_plays(vec![PlayEvent::new("t1", "2026-08-01T10:00:00Z")]);
        provider.queue_plays(vec![]);

        let first = provider.recent_plays("tok").await.unwrap();
        assert_eq!(first.len(), 1);

        let second = provider.recent_plays("tok").await.unwrap();
        assert!(second.is_empty());

        // Exhausted queue keeps returning empty histories
        let third = provider.recent_plays("tok").await.unwrap();
        assert!(third.is_empty());
    }
}
