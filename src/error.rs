//! Error types for the cache proxy
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Proxy Error Enum ==
/// Outcome of a failed lookup, as seen by the HTTP layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProxyError {
    /// Missing or malformed request key
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The backing store confirmed the key does not exist
    #[error("Key not found: {0}")]
    NotFound(String),

    /// The backing store could not be queried
    #[error("Backing store error: {0}")]
    Backend(#[from] BackendError),

    /// Request path has no handler
    #[error("Not Supported")]
    Unsupported(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = match &self {
            ProxyError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ProxyError::NotFound(_) => StatusCode::NOT_FOUND,
            ProxyError::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::Unsupported(_) => StatusCode::BAD_REQUEST,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Backend Error Enum ==
/// Any failure to talk to the backing store other than "not found".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The configured address could not be turned into a client
    #[error("invalid backing store address '{0}'")]
    InvalidAddress(String),

    /// Connection refused, reset or otherwise lost
    #[error("connection failed: {0}")]
    Connection(String),

    /// The store did not answer in time
    #[error("timed out after {0}ms")]
    Timeout(u64),

    /// The store answered with something we could not interpret
    #[error("protocol error: {0}")]
    Protocol(String),
}

// == Config Error Enum ==
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache proxy.
pub type Result<T> = std::result::Result<T, ProxyError>;
