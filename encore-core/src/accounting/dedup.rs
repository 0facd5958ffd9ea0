//! Timestamp deduplication and aggregation

use std::collections::HashSet;

/// Result of merging a fresh batch into a listener's historical set
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    /// Batch timestamps not already on record; this is what bonus
    /// propagation consumes
    pub new_timestamps: Vec<String>,
    /// Full merged set (existing followed by the new timestamps)
    pub merged: Vec<String>,
}

impl MergeOutcome {
    pub fn new_count(&self) -> u64 {
        self.new_timestamps.len() as u64
    }

    pub fn total(&self) -> u64 {
        self.merged.len() as u64
    }
}

/// Merge a batch of candidate timestamps into the existing set
///
/// Idempotent: re-applying the same batch yields the same merged set and
/// an empty new-timestamp list. Duplicates within the batch itself
/// collapse to a single occurrence.
pub fn merge_timestamps(existing: &[String], batch: &[String]) -> MergeOutcome {
    let mut seen: HashSet<&str> = existing.iter().map(String::as_str).collect();

    let mut new_timestamps = Vec::new();
    for timestamp in batch {
        if seen.insert(timestamp.as_str()) {
            new_timestamps.push(timestamp.clone());
        }
    }

    let mut merged = existing.to_vec();
    merged.extend(new_timestamps.iter().cloned());

    MergeOutcome {
        new_timestamps,
        merged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_merge_into_empty() {
        let outcome = merge_timestamps(&[], &ts(&["a", "b"]));
        assert_eq!(outcome.new_count(), 2);
        assert_eq!(outcome.total(), 2);
    }

    #[test]
    fn test_overlapping_batches_never_double_count() {
        // T1 then T2 with T1 ∩ T2 ≠ ∅ yields |T1 ∪ T2|
        let first = merge_timestamps(&[], &ts(&["a", "b", "c"]));
        let second = merge_timestamps(&first.merged, &ts(&["b", "c", "d"]));

        assert_eq!(second.new_timestamps, ts(&["d"]));
        assert_eq!(second.total(), 4);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let batch = ts(&["a", "b"]);
        let first = merge_timestamps(&[], &batch);
        let second = merge_timestamps(&first.merged, &batch);

        assert!(second.new_timestamps.is_empty());
        assert_eq!(second.merged, first.merged);
    }

    #[test]
    fn test_batch_internal_duplicates_collapse() {
        let outcome = merge_timestamps(&[], &ts(&["a", "a", "b"]));
        assert_eq!(outcome.new_count(), 2);
        assert_eq!(outcome.total(), 2);
    }

    #[test]
    fn test_empty_batch_is_noop() {
        let existing = ts(&["a"]);
        let outcome = merge_timestamps(&existing, &[]);
        assert!(outcome.new_timestamps.is_empty());
        assert_eq!(outcome.merged, existing);
    }
}
