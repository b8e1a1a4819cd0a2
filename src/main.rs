//! Category Cache - cache facade service
//!
//! Runs the cache facade over Redis (or an in-memory store) and exposes the
//! admin API for statistics, health and invalidation.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use category_cache::api::{create_router, AppState};
use category_cache::{
    spawn_cleanup_task, spawn_health_task, BackingStore, CacheFacade, Config, MemoryStore,
    RedisStore,
};

/// Main entry point for the cache service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Connect the backing store (Redis when configured, else in-memory)
/// 4. Build the cache facade and warm allow-listed categories
/// 5. Start background tasks
/// 6. Serve the admin API until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "category_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Category Cache");

    let config = Config::from_env();
    info!(
        "Configuration loaded: prefix={}, port={}, categories={}",
        config.key_prefix,
        config.server_port,
        config.category_ttls.len()
    );

    let mut background: Vec<JoinHandle<()>> = Vec::new();

    let store: Arc<dyn BackingStore> = match &config.redis_url {
        Some(url) => Arc::new(
            RedisStore::connect(url)
                .await
                .context("failed to connect to Redis")?,
        ),
        None => {
            warn!("REDIS_URL not set, using in-memory backing store");
            let memory = Arc::new(MemoryStore::new());
            background.push(spawn_cleanup_task(memory.clone(), config.cleanup_interval));
            memory
        }
    };

    let cache = Arc::new(CacheFacade::from_config(store, &config));

    if config.warm_on_startup {
        let loaded = cache.warm_all().await;
        info!("Startup warmup loaded {} entries", loaded);
    }

    background.push(spawn_health_task(
        cache.clone(),
        config.health_check_interval,
    ));

    let app = create_router(AppState::from_shared(cache));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(background))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then aborts background tasks.
async fn shutdown_signal(background: Vec<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
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

    for handle in background {
        handle.abort();
    }
    warn!("Background tasks aborted");
}
