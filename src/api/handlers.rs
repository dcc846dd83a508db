//! API Handlers
//!
//! HTTP request handlers for the lookup endpoint and the fallback route.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::Uri,
};
use tracing::info;

use crate::backend::{BackingStore, RedisStore};
use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::{BackendError, ProxyError, Result};
use crate::models::LookupQuery;
use crate::proxy::CacheProxy;

/// Application state shared across all handlers.
///
/// Built once at startup; cloning only clones the handles inside.
#[derive(Clone)]
pub struct AppState {
    /// Cache-aside dispatcher
    pub proxy: CacheProxy,
}

impl AppState {
    /// Creates a new AppState around the given dispatcher.
    pub fn new(proxy: CacheProxy) -> Self {
        Self { proxy }
    }

    /// Creates a new AppState from a cache and any backing store.
    pub fn with_store(cache: CacheStore, store: Arc<dyn BackingStore>) -> Self {
        Self::new(CacheProxy::new(cache, store))
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds the bounded cache and a Redis client for the configured
    /// address. No connection is made until the first cache miss.
    pub fn from_config(config: &Config) -> std::result::Result<Self, BackendError> {
        let cache = CacheStore::new(config.capacity, config.ttl_seconds);
        let store = RedisStore::new(
            &config.backend_addr,
            Duration::from_millis(config.backend_timeout_ms),
        )?;
        Ok(Self::with_store(cache, Arc::new(store)))
    }
}

/// Handler for /get?key=..., whatever the method
///
/// Answers with the value as plain text.
pub async fn lookup_handler(
    State(state): State<AppState>,
    Query(query): Query<LookupQuery>,
) -> Result<String> {
    if let Some(error_msg) = query.validate() {
        info!("(400) lookup rejected: {}", error_msg);
        return Err(ProxyError::InvalidRequest(error_msg));
    }

    state.proxy.lookup(&query.key).await
}

/// Fallback for every route without a handler.
pub async fn not_supported_handler(uri: Uri) -> ProxyError {
    info!("(400) {} - Not Supported", uri.path());
    ProxyError::Unsupported(uri.path().to_string())
}
