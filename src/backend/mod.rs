//! Backing Store Module
//!
//! The authoritative key-value store the proxy sits in front of.

mod redis_store;

use async_trait::async_trait;

use crate::error::BackendError;

pub use redis_store::RedisStore;

// == Backing Store Trait ==
/// Read-only access to the backing key-value store.
#[async_trait]
pub trait BackingStore: Send + Sync {
    /// Fetches the value stored under `key`.
    ///
    /// # Returns
    /// - `Ok(Some(value))` if the key exists
    /// - `Ok(None)` if the store confirms the key does not exist
    /// - `Err(_)` for any transport or protocol failure
    async fn get(&self, key: &str) -> Result<Option<String>, BackendError>;
}
