//! Tracked Cache - a typed key-value caching layer
//!
//! Serves typed storage with call instrumentation and a TTL page cache over
//! an in-memory backend.

mod api;
mod cache;
mod config;
mod error;
mod instrument;
mod models;
mod store;
mod tasks;
mod web;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{create_router, AppState};
use config::Config;
use store::MemoryStore;
use tasks::spawn_cleanup_task;
use web::HttpFetcher;

/// Main entry point for the Tracked Cache server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the in-memory backend and flush-initialize the typed cache
/// 4. Start background TTL cleanup task
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tracked_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Tracked Cache server");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, page_ttl={}s, fetch_timeout={}s, cleanup_interval={}s",
        config.server_port, config.page_ttl, config.fetch_timeout, config.cleanup_interval
    );

    // Create the backend and build application state (flushes the store)
    let backend = Arc::new(MemoryStore::new());
    let fetcher = Arc::new(
        HttpFetcher::new(Duration::from_secs(config.fetch_timeout))
            .context("Failed to build HTTP fetcher")?,
    );
    let state = AppState::initialize(backend.clone(), fetcher, config.page_ttl)
        .await
        .context("Failed to initialize application state")?;
    info!("Cache initialized, store flushed");

    // Start background cleanup task
    let cleanup_handle = spawn_cleanup_task(backend, config.cleanup_interval);
    info!("Background cleanup task started");

    // Create router with all endpoints
    let app = create_router(state);

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the cleanup task and allows graceful shutdown.
async fn shutdown_signal(cleanup_handle: tokio::task::JoinHandle<()>) {
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

    // Abort the cleanup task
    cleanup_handle.abort();
    warn!("Cleanup task aborted");
}
