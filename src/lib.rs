//! Cache Proxy - A cache-aside HTTP proxy in front of Redis
//!
//! Serves lookups from a bounded local cache with TTL expiry and
//! least-frequently-used eviction, falling back to the backing store on a
//! miss.

pub mod api;
pub mod backend;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod proxy;

pub use api::AppState;
pub use config::Config;
pub use proxy::CacheProxy;
