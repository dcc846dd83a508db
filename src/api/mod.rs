//! API Module
//!
//! HTTP handlers and routing for the cache proxy.
//!
//! # Endpoints
//! - `/get?key=<key>` - Look up a key through the cache, any method
//! - any other path - 400 Not Supported

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
