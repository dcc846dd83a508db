//! Cache-Aside Dispatcher
//!
//! Orchestrates one lookup: cache first, backing store on a miss, then
//! populate the cache with whatever the store returned.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::future::FutureExt;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::in_flight::{FetchResult, InFlight};
use crate::backend::BackingStore;
use crate::cache::{CacheStats, CacheStore};
use crate::error::{BackendError, ProxyError, Result};

// == Cache Proxy ==
/// Cache-aside dispatcher shared by all request handlers.
///
/// The cache lock is held only while the cache itself is read or written,
/// never across a backing store call. Concurrent misses on one key share a
/// single backing store fetch. A slow store therefore delays only the
/// requests waiting on that key; hits on other keys are never blocked by it.
#[derive(Clone)]
pub struct CacheProxy {
    cache: Arc<RwLock<CacheStore>>,
    store: Arc<dyn BackingStore>,
    in_flight: Arc<InFlight>,
}

impl CacheProxy {
    // == Constructor ==
    /// Creates a dispatcher owning `cache` and reading through `store`.
    pub fn new(cache: CacheStore, store: Arc<dyn BackingStore>) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            store,
            in_flight: Arc::new(InFlight::new()),
        }
    }

    // == Lookup ==
    /// Resolves `key` through the cache, falling back to the backing store.
    ///
    /// # Returns
    /// - `Ok(value)` on a cache hit or a backing store hit
    /// - `ProxyError::InvalidRequest` if `key` is empty
    /// - `ProxyError::NotFound` if the backing store has no such key
    /// - `ProxyError::Backend` if the backing store could not be queried
    ///
    /// Backing store misses are not cached.
    pub async fn lookup(&self, key: &str) -> Result<String> {
        if key.is_empty() {
            return Err(ProxyError::InvalidRequest("key is empty".to_string()));
        }

        let cached = self.cache.write().await.get(key);
        if let Some(value) = cached {
            debug!(key, "Cache hit");
            return Ok(value);
        }

        debug!(key, "Cache miss, querying backing store");
        match self.fetch(key).await {
            Ok(Some(value)) => Ok(value),
            Ok(None) => {
                debug!(key, "Backing store has no such key");
                Err(ProxyError::NotFound(key.to_string()))
            }
            Err(err) => {
                warn!(key, error = %err, "Backing store lookup failed");
                Err(ProxyError::Backend(err))
            }
        }
    }

    /// Joins the pending fetch for `key` or starts a new one.
    async fn fetch(&self, key: &str) -> FetchResult {
        let (flight, started) = self.in_flight.join_or_start(key, || {
            let cache = Arc::clone(&self.cache);
            let store = Arc::clone(&self.store);
            let in_flight = Arc::clone(&self.in_flight);
            let key = key.to_string();

            // The fetch runs as its own task so that it completes, populates
            // the cache and leaves the table even if every waiter goes away.
            // A panicking store client is caught here, inside the task.
            let task = tokio::spawn({
                let in_flight = Arc::clone(&in_flight);
                let key = key.clone();
                async move {
                    let result = AssertUnwindSafe(fetch_and_populate(cache, store, key.clone()))
                        .catch_unwind()
                        .await
                        .unwrap_or_else(|_| {
                            Err(BackendError::Protocol("backing store client panicked".to_string()))
                        });
                    in_flight.finish(&key);
                    result
                }
            });

            async move {
                match task.await {
                    Ok(result) => result,
                    Err(err) => {
                        // Cancelled by runtime shutdown before it could leave the table
                        in_flight.finish(&key);
                        Err(BackendError::Protocol(format!("fetch task failed: {}", err)))
                    }
                }
            }
            .boxed()
        });

        if !started {
            debug!(key, "Joining in-flight backing store fetch");
        }
        flight.await
    }

    // == Stats ==
    /// Returns a snapshot of the cache statistics.
    pub async fn stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }

    /// Shared handle to the underlying cache.
    pub fn cache(&self) -> &Arc<RwLock<CacheStore>> {
        &self.cache
    }

    /// Number of backing store fetches currently pending.
    pub fn pending_fetches(&self) -> usize {
        self.in_flight.len()
    }
}

/// Queries the backing store and adds any value found to the cache.
async fn fetch_and_populate(
    cache: Arc<RwLock<CacheStore>>,
    store: Arc<dyn BackingStore>,
    key: String,
) -> FetchResult {
    let result = store.get(&key).await;
    if let Ok(Some(value)) = &result {
        debug!(key = %key, "Populating cache from backing store");
        cache.write().await.add(key, value.clone());
    }
    result
}
