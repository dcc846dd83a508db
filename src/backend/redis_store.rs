//! Redis Backing Store
//!
//! Reads values from a Redis server through a lazily created, automatically
//! reconnecting connection manager.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, RedisError};
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::BackingStore;
use crate::error::BackendError;

// == Redis Store ==
/// Backing store client for a single Redis server.
pub struct RedisStore {
    client: redis::Client,
    /// Created on first use so the proxy can start before Redis is reachable
    manager: Mutex<Option<ConnectionManager>>,
    timeout: Duration,
}

impl RedisStore {
    // == Constructor ==
    /// Creates a store for `addr` without connecting.
    ///
    /// # Arguments
    /// * `addr` - `host:port` or a full `redis://` URL
    /// * `timeout` - Upper bound for each call, connection setup included
    pub fn new(addr: &str, timeout: Duration) -> Result<Self, BackendError> {
        let url = normalize_address(addr);
        let client = redis::Client::open(url.as_str())
            .map_err(|e| BackendError::InvalidAddress(format!("{}: {}", addr, e)))?;

        Ok(Self {
            client,
            manager: Mutex::new(None),
            timeout,
        })
    }

    /// Returns the shared connection, connecting if this is the first call.
    async fn connection(&self) -> Result<ConnectionManager, BackendError> {
        let mut slot = self.manager.lock().await;
        if let Some(conn) = slot.as_ref() {
            return Ok(conn.clone());
        }

        let conn = self
            .client
            .get_connection_manager()
            .await
            .map_err(classify_error)?;
        info!(addr = ?self.client.get_connection_info().addr, "Connected to backing Redis");
        *slot = Some(conn.clone());
        Ok(conn)
    }
}

#[async_trait]
impl BackingStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        let fetch = async {
            let mut conn = self.connection().await?;
            conn.get::<_, Option<String>>(key)
                .await
                .map_err(classify_error)
        };

        let value = tokio::time::timeout(self.timeout, fetch)
            .await
            .map_err(|_| BackendError::Timeout(self.timeout.as_millis() as u64))??;

        debug!(key, found = value.is_some(), "Backing Redis answered");
        Ok(value)
    }
}

// == Utility Functions ==
/// Turns a bare `host:port` into a Redis URL; URLs pass through unchanged.
pub fn normalize_address(addr: &str) -> String {
    if addr.contains("://") {
        addr.to_string()
    } else {
        format!("redis://{}/", addr)
    }
}

fn classify_error(err: RedisError) -> BackendError {
    if err.is_io_error() || err.is_connection_refusal() || err.is_connection_dropped() {
        BackendError::Connection(err.to_string())
    } else {
        BackendError::Protocol(err.to_string())
    }
}
