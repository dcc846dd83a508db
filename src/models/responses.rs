//! Response DTOs for the cache proxy API
//!
//! Successful lookups answer with the raw value as plain text, so the only
//! structured body is the error body.

use serde::Serialize;

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
