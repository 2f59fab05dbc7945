//! Guestbook - API backend for guestbook entries
//!
//! Serves the guestbook REST API over PostgreSQL with a Redis cache.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use guestbook::cache::{CacheBackend, MemoryCache, RedisCache};
use guestbook::config::{CacheBackendKind, Config, StoreBackend};
use guestbook::store::{EntryStore, MemoryEntryStore, PgEntryStore};
use guestbook::{create_router, spawn_cleanup_task, AppState};

/// Main entry point for the guestbook API server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Connect the durable store and make sure the schema exists
/// 4. Open the cache (Redis connects lazily on first use)
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "guestbook=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Guestbook API");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, store={:?}, cache={:?}, dependency_timeout={:?}",
        config.server_port, config.store_backend, config.cache_backend, config.dependency_timeout
    );

    let store: Arc<dyn EntryStore> = match config.store_backend {
        StoreBackend::Postgres => {
            let store = PgEntryStore::connect(
                &config.database_url(),
                config.db_max_connections,
                config.dependency_timeout,
            )
            .await
            .context("failed to connect to PostgreSQL")?;
            store
                .ensure_schema()
                .await
                .context("failed to create entries table")?;
            info!("Connected to PostgreSQL at {}:{}", config.db_host, config.db_port);
            Arc::new(store)
        }
        StoreBackend::Memory => {
            warn!("Using in-process store; entries are lost on shutdown");
            Arc::new(MemoryEntryStore::new())
        }
    };

    let mut cleanup_handle = None;
    let cache: Arc<dyn CacheBackend> = match config.cache_backend {
        CacheBackendKind::Redis => {
            let cache = RedisCache::open(&config.redis_url(), config.dependency_timeout)
                .context("invalid Redis address")?;
            if let Err(err) = cache.ping().await {
                warn!("Redis not reachable yet, continuing without cache: {}", err);
            } else {
                info!("Connected to Redis at {}:{}", config.redis_host, config.redis_port);
            }
            Arc::new(cache)
        }
        CacheBackendKind::Memory => {
            let cache = Arc::new(MemoryCache::new());
            cleanup_handle = Some(spawn_cleanup_task(cache.clone(), config.cleanup_interval));
            info!("Using in-process cache");
            cache
        }
    };

    let state = AppState::new(store, cache, config.health_timeout);
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the cleanup task if one is running.
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
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

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Cleanup task aborted");
    }
}
