//! Cache Module
//!
//! Provides the bounded in-memory cache with lazy TTL expiry and
//! least-frequently-accessed eviction.

mod entry;
mod frequency;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use frequency::FrequencyTracker;
pub use stats::CacheStats;
pub use store::CacheStore;
