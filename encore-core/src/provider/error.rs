//! Provider error types

use thiserror::Error;

/// Errors from the streaming provider
///
/// `Auth` is kept distinct from `Upstream` so callers can prompt a
/// reconnect (token refresh or re-login) instead of a generic retry.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("upstream request failed: {0}")]
    Upstream(String),
}

impl ProviderError {
    /// True for token-invalid/expired failures
    pub fn is_auth(&self) -> bool {
        matches!(self, ProviderError::Auth(_))
    }
}
