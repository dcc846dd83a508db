//! Cache Proxy - A cache-aside HTTP proxy in front of Redis
//!
//! Serves lookups from a bounded local cache with TTL expiry and
//! least-frequently-used eviction, falling back to the backing store on a
//! miss.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cache_proxy::api::create_router;
use cache_proxy::{AppState, CacheProxy, Config};

/// Main entry point for the cache proxy.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from `CONFIG_FILE` or environment variables
/// 3. Create the bounded cache and the backing store client
/// 4. Create Axum router with the lookup endpoint
/// 5. Start HTTP server on configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cache_proxy=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cache proxy");

    let config = Config::load().context("failed to load configuration")?;
    info!(
        "Configuration loaded: backend={}, capacity={}, ttl={}s, port={}, backend_timeout={}ms",
        config.backend_addr,
        config.capacity,
        config.ttl_seconds,
        config.server_port,
        config.backend_timeout_ms
    );

    let state = AppState::from_config(&config).context("failed to create backing store client")?;
    let proxy = state.proxy.clone();
    info!("Cache initialized, backing store at {}", config.backend_addr);

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(proxy))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// Logs the final cache statistics before letting the server drain.
async fn shutdown_signal(proxy: CacheProxy) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    let stats = proxy.stats().await;
    info!(
        hits = stats.hits,
        misses = stats.misses,
        expirations = stats.expirations,
        evictions = stats.evictions,
        entries = stats.total_entries,
        hit_rate = stats.hit_rate(),
        "Final cache statistics"
    );
}
