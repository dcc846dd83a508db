//! API Routes
//!
//! Configures the Axum router for the cache proxy.

use axum::{routing::any, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{lookup_handler, not_supported_handler, AppState};

/// Creates the main router.
///
/// # Endpoints
/// - `/get?key=<key>` - Look up a key through the cache, any method
/// - anything else - 400 Not Supported
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/get", any(lookup_handler))
        .fallback(not_supported_handler)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
