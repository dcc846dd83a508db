//! Cache Store Module
//!
//! The bounded cache: HashMap storage with lazy TTL expiry and
//! least-frequently-accessed eviction.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, FrequencyTracker};

// == Cache Store ==
/// Bounded key-value cache with capacity and TTL limits.
///
/// Expired entries are only removed when a `get` finds them, so until then
/// they still occupy a slot and take part in eviction.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Eviction order by access count
    frequency: FrequencyTracker,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Maximum entry age before it is treated as absent
    ttl: Duration,
    /// Next insertion sequence number
    next_sequence: u64,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore with the given capacity and TTL.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries, must be positive
    /// * `ttl_seconds` - Maximum entry age in seconds
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize, ttl_seconds: u64) -> Self {
        assert!(capacity > 0, "cache capacity must be positive");
        Self {
            entries: HashMap::with_capacity(capacity.min(1024)),
            frequency: FrequencyTracker::new(),
            stats: CacheStats::new(),
            capacity,
            ttl: Duration::from_secs(ttl_seconds),
            next_sequence: 0,
        }
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// A live entry has its access count incremented. An entry older than the
    /// TTL is removed and reported as absent.
    pub fn get(&mut self, key: &str) -> Option<String> {
        let ttl = self.ttl;
        let Some(entry) = self.entries.get_mut(key) else {
            self.stats.record_miss();
            return None;
        };

        if entry.is_expired(ttl) {
            debug!(key, age_secs = entry.age_secs(), "Cache entry expired, removing");
            self.entries.remove(key);
            self.frequency.remove(key);
            self.stats.record_expiration();
            self.stats.set_total_entries(self.entries.len());
            return None;
        }

        let count = entry.record_access();
        let value = entry.value.clone();
        let sequence = entry.sequence;
        self.frequency.track(key, count, sequence);
        self.stats.record_hit();
        Some(value)
    }

    // == Add ==
    /// Stores a key-value pair.
    ///
    /// If the key is new and the cache is full, the entry with the lowest
    /// access count is evicted first (oldest insertion on ties). The stored
    /// entry always starts with an access count of 1.
    pub fn add(&mut self, key: String, value: String) {
        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            if let Some(evicted) = self.frequency.evict_least_frequent() {
                debug!(key = %evicted, "Cache at capacity, evicting least frequently accessed");
                self.entries.remove(&evicted);
                self.stats.record_eviction();
            }
        }

        let sequence = self.next_sequence;
        self.next_sequence += 1;

        let entry = CacheEntry::new(value, sequence);
        self.frequency.track(&key, entry.access_count, sequence);
        self.entries.insert(key, entry);
        self.stats.set_total_entries(self.entries.len());

        debug_assert!(
            self.entries.len() <= self.capacity,
            "cache holds {} entries, capacity is {}",
            self.entries.len(),
            self.capacity
        );
        debug_assert_eq!(self.entries.len(), self.frequency.len());
    }

    // == Access Count ==
    /// Returns the stored access count for `key` without touching it.
    pub fn access_count(&self, key: &str) -> Option<u64> {
        self.entries.get(key).map(|entry| entry.access_count)
    }

    /// Returns true if `key` is stored, expired or not. Does not count as a
    /// lookup.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl.as_secs()
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    fn add(store: &mut CacheStore, key: &str, value: &str) {
        store.add(key.to_string(), value.to_string());
    }

    #[test]
    fn test_store_new() {
        let store = CacheStore::new(100, 300);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.capacity(), 100);
        assert_eq!(store.ttl_seconds(), 300);
    }

    #[test]
    #[should_panic(expected = "capacity must be positive")]
    fn test_store_zero_capacity_panics() {
        let _ = CacheStore::new(0, 300);
    }

    #[test]
    fn test_store_add_and_get() {
        let mut store = CacheStore::new(100, 300);

        add(&mut store, "key1", "value1");

        assert_eq!(store.get("key1"), Some("value1".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store = CacheStore::new(100, 300);
        assert_eq!(store.get("nonexistent"), None);
    }

    #[test]
    fn test_store_empty_value_is_a_hit() {
        let mut store = CacheStore::new(100, 300);

        add(&mut store, "blank", "");

        assert_eq!(store.get("blank"), Some(String::new()));
    }

    #[test]
    fn test_hit_increments_access_count() {
        let mut store = CacheStore::new(2, 5);
        add(&mut store, "abc", "Hello");

        for _ in 0..3 {
            assert_eq!(store.get("abc"), Some("Hello".to_string()));
        }

        assert_eq!(store.access_count("abc"), Some(4));
    }

    #[test]
    fn test_overwrite_resets_access_count() {
        let mut store = CacheStore::new(100, 300);

        add(&mut store, "key1", "value1");
        store.get("key1");
        store.get("key1");
        add(&mut store, "key1", "value2");

        assert_eq!(store.access_count("key1"), Some(1));
        assert_eq!(store.get("key1"), Some("value2".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_overwrite_at_capacity_does_not_evict() {
        let mut store = CacheStore::new(2, 300);

        add(&mut store, "abc", "One");
        add(&mut store, "def", "Two");
        add(&mut store, "abc", "Three");

        assert_eq!(store.len(), 2);
        assert!(store.contains_key("def"));
        assert_eq!(store.stats().evictions, 0);
    }

    #[test]
    fn test_eviction_tie_goes_to_oldest() {
        let mut store = CacheStore::new(2, 300);

        add(&mut store, "abc", "One");
        add(&mut store, "def", "Two");
        add(&mut store, "ghi", "Three");

        assert_eq!(store.len(), 2);
        assert!(!store.contains_key("abc"));
        assert!(store.contains_key("def"));
        assert!(store.contains_key("ghi"));
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_eviction_by_access_count() {
        let mut store = CacheStore::new(2, 300);

        add(&mut store, "abc", "One");
        add(&mut store, "def", "Two");
        store.get("abc");
        store.get("abc");
        store.get("def");

        add(&mut store, "xyz", "Three");

        assert_eq!(store.get("def"), None);
        assert_eq!(store.get("abc"), Some("One".to_string()));
        assert_eq!(store.get("xyz"), Some("Three".to_string()));
    }

    #[test]
    fn test_recent_access_does_not_protect_entry() {
        let mut store = CacheStore::new(2, 300);

        add(&mut store, "popular", "p");
        for _ in 0..5 {
            store.get("popular");
        }
        add(&mut store, "recent", "r");
        store.get("recent");

        // "recent" was touched last but has fewer accesses
        add(&mut store, "new", "n");

        assert!(store.contains_key("popular"));
        assert!(!store.contains_key("recent"));
    }

    #[test]
    fn test_store_ttl_expiration() {
        let mut store = CacheStore::new(100, 1);
        add(&mut store, "abc", "Hello");

        assert!(store.get("abc").is_some());

        sleep(Duration::from_millis(1100));

        assert_eq!(store.get("abc"), None);
        assert!(!store.contains_key("abc"));
        assert_eq!(store.len(), 0);
        assert_eq!(store.stats().expirations, 1);
    }

    #[test]
    fn test_expired_entry_still_occupies_capacity() {
        let mut store = CacheStore::new(2, 1);

        add(&mut store, "stale", "s");
        sleep(Duration::from_millis(1100));
        add(&mut store, "fresh", "f");

        // Nobody has read "stale", so it still counts toward size
        assert_eq!(store.len(), 2);
        assert!(store.contains_key("stale"));

        add(&mut store, "newest", "n");
        assert_eq!(store.len(), 2);
        assert!(!store.contains_key("stale"));
    }

    #[test]
    fn test_overwrite_resets_insertion_time() {
        let mut store = CacheStore::new(10, 1);

        add(&mut store, "abc", "old");
        sleep(Duration::from_millis(700));
        add(&mut store, "abc", "new");
        sleep(Duration::from_millis(700));

        // 1.4s since the first add, 0.7s since the overwrite
        assert_eq!(store.get("abc"), Some("new".to_string()));
    }

    #[test]
    fn test_readd_after_expiry() {
        let mut store = CacheStore::new(10, 1);

        add(&mut store, "key", "old");
        sleep(Duration::from_millis(1100));
        assert_eq!(store.get("key"), None);

        add(&mut store, "key", "new");
        assert_eq!(store.get("key"), Some("new".to_string()));
        assert_eq!(store.access_count("key"), Some(2));
    }

    #[test]
    fn test_store_stats() {
        let mut store = CacheStore::new(100, 300);

        add(&mut store, "key1", "value1");
        store.get("key1");
        store.get("nonexistent");

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }

    #[test]
    fn test_capacity_of_one() {
        let mut store = CacheStore::new(1, 300);

        add(&mut store, "a", "1");
        add(&mut store, "b", "2");

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("b"), Some("2".to_string()));
        assert_eq!(store.get("a"), None);
    }
}
