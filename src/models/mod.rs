//! Request and Response models for the cache proxy API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! deserializing query strings and serializing error bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::LookupQuery;
pub use responses::ErrorResponse;
