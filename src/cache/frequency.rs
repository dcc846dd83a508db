//! Frequency Tracker Module
//!
//! Implements least-frequently-accessed tracking for cache eviction.

use std::collections::{BTreeMap, HashMap};

// == Frequency Tracker ==
/// Tracks access counts for least-frequently-accessed eviction.
///
/// Keys are ordered by `(access_count, sequence)` where:
/// - First = lowest count, oldest insertion among equal counts
/// - Last = highest count, newest insertion among equal counts
///
/// Recency of access plays no part in the ordering.
#[derive(Debug, Default)]
pub struct FrequencyTracker {
    /// Keys ordered by (access count, insertion sequence)
    order: BTreeMap<(u64, u64), String>,
    /// Current rank of every tracked key
    ranks: HashMap<String, (u64, u64)>,
}

impl FrequencyTracker {
    // == Constructor ==
    /// Creates a new empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    // == Track ==
    /// Records `key` with the given access count and insertion sequence.
    ///
    /// Any previous rank of the key is replaced.
    pub fn track(&mut self, key: &str, access_count: u64, sequence: u64) {
        self.remove(key);
        let rank = (access_count, sequence);
        self.order.insert(rank, key.to_string());
        self.ranks.insert(key.to_string(), rank);
    }

    // == Remove ==
    /// Removes a key from the tracker.
    pub fn remove(&mut self, key: &str) {
        if let Some(rank) = self.ranks.remove(key) {
            self.order.remove(&rank);
        }
    }

    // == Evict Least Frequent ==
    /// Returns and removes the key with the lowest access count.
    ///
    /// Ties go to the oldest insertion. Returns None if tracker is empty.
    pub fn evict_least_frequent(&mut self) -> Option<String> {
        let (_, key) = self.order.pop_first()?;
        self.ranks.remove(&key);
        Some(key)
    }

    // == Peek Least Frequent ==
    /// Returns the next eviction candidate without removing it.
    #[allow(dead_code)]
    pub fn peek_least_frequent(&self) -> Option<&String> {
        self.order.first_key_value().map(|(_, key)| key)
    }

    // == Access Count ==
    /// Returns the tracked access count for `key`.
    pub fn access_count(&self, key: &str) -> Option<u64> {
        self.ranks.get(key).map(|(count, _)| *count)
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}
