//! Streaming-provider collaborator
//!
//! The engine never talks OAuth itself: callers hand it an already-issued
//! access token, and the provider resolves that token to a stable listener
//! identifier and a recent play history.

mod error;
mod mock;
mod spotify;
mod traits;

pub use error::ProviderError;
pub use mock::MockProvider;
pub use spotify::SpotifyProvider;
pub use traits::{PlayEvent, StreamingProvider};
