//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with access counting
//! and insertion-time based expiry.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value, never interpreted by the cache
    pub value: String,
    /// Insertion instant, never refreshed on read
    pub inserted_at: Instant,
    /// Number of accesses: 1 on insertion, +1 per read hit
    pub access_count: u64,
    /// Insertion order, used to break access-count ties on eviction
    pub sequence: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry inserted now with an access count of 1.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `sequence` - Monotonic insertion number assigned by the store
    pub fn new(value: String, sequence: u64) -> Self {
        Self {
            value,
            inserted_at: Instant::now(),
            access_count: 1,
            sequence,
        }
    }

    // == Is Expired ==
    /// Checks if the entry is older than `ttl` at instant `now`.
    ///
    /// Boundary condition: an entry whose age equals the TTL exactly is still
    /// live; it only expires once its age is strictly greater.
    pub fn is_expired_at(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.inserted_at) > ttl
    }

    /// Checks if the entry is older than `ttl` right now.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.is_expired_at(Instant::now(), ttl)
    }

    // == Record Access ==
    /// Records a read hit and returns the new access count.
    pub fn record_access(&mut self) -> u64 {
        self.access_count = self.access_count.saturating_add(1);
        self.access_count
    }

    /// Age of the entry in whole seconds.
    pub fn age_secs(&self) -> u64 {
        self.inserted_at.elapsed().as_secs()
    }
}
