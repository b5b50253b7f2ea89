//! Page Cache - rendered HTML pages served through an expiring in-memory cache

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use page_cache::api::create_router;
use page_cache::{spawn_cleanup_task, AppState, Config};

/// Main entry point for the page cache server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from the environment and `ENV_FILE` (default `.env`)
/// 3. Build the template store and page cache
/// 4. Start background TTL cleanup task, unless disabled
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "page_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting page cache server");

    let env_file = std::env::var("ENV_FILE").unwrap_or_else(|_| ".env".to_string());
    let config = Config::from_env_with_file(&env_file)
        .with_context(|| format!("failed to load configuration from {}", env_file))?;
    info!(
        "Configuration loaded: port={}, page_cache_ttl={}s, cleanup_interval={}s",
        config.server_port, config.page_cache_ttl, config.cleanup_interval
    );

    let state = AppState::from_config(&config).context("failed to initialise page service")?;
    info!("Page cache initialized");

    let cleanup_handle = config
        .cleanup_interval()
        .map(|interval| spawn_cleanup_task(state.cache().clone(), interval));
    match cleanup_handle {
        Some(_) => info!("Background cleanup task started"),
        None => info!("Background cleanup disabled, expired pages are reclaimed lazily"),
    }

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
/// On shutdown signal, aborts the cleanup task and allows graceful shutdown.
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
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

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Cleanup task aborted");
    }
}
