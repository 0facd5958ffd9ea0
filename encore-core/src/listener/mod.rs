//! Listener records and their persistence adapter

mod store;
mod types;

pub use store::ListenerStore;
pub use types::{ListenerRecord, ReferralState};
