//! Play-event filtering

use std::collections::HashSet;

use crate::provider::PlayEvent;

/// The set of media identifiers whose plays count
///
/// Typically the tracked track id(s), or every track id belonging to a
/// tracked album.
#[derive(Debug, Clone, Default)]
pub struct TrackedMedia {
    ids: HashSet<String>,
}

impl TrackedMedia {
    pub fn new(ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn matches(&self, media_id: &str) -> bool {
        self.ids.contains(media_id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Extract the timestamps of plays matching the tracked media
///
/// Pure; an empty input list yields an empty output.
pub fn qualifying_timestamps(events: &[PlayEvent], tracked: &TrackedMedia) -> Vec<String> {
    events
        .iter()
        .filter(|event| tracked.matches(&event.media_id))
        .map(|event| event.played_at.clone())
        .collect()
}
