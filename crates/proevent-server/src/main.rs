//! Capture server entry point.
//!
//! Bootstraps the storage backend and forwarder, then starts the Axum
//! HTTP server with graceful shutdown on SIGINT/SIGTERM.

use std::sync::Arc;

use anyhow::Context;
use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use proevent_storage::{JsonFileBackend, KeyValueStore, MemoryBackend, RedbBackend};

use proevent_server::config::{ServerConfig, StorageBackendType};
use proevent_server::forward::Forwarder;
use proevent_server::routes;
use proevent_server::state::AppState;

use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment.
    let config = ServerConfig::from_env();

    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    info!(storage = ?config.storage_backend, "capture server starting");

    let state = build_app_state(&config)?;
    let app = build_router(Arc::clone(&state));

    // Bind and serve.
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, "capture server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("capture server stopped");
    Ok(())
}

/// Build the shared application state.
fn build_app_state(config: &ServerConfig) -> anyhow::Result<Arc<AppState>> {
    let storage: Arc<dyn KeyValueStore> = match &config.storage_backend {
        StorageBackendType::Memory => {
            info!("using in-memory storage (leads will not persist)");
            Arc::new(MemoryBackend::new())
        }
        StorageBackendType::File { path } => {
            info!(path = %path, "using JSON-file storage");
            ensure_parent_dir(path)?;
            Arc::new(JsonFileBackend::new(path))
        }
        StorageBackendType::Redb { path } => {
            info!(path = %path, "using redb storage");
            ensure_parent_dir(path)?;
            Arc::new(RedbBackend::open(path).context("failed to open redb storage")?)
        }
    };

    let forwarder = Forwarder::new(config.forward.clone())
        .context("failed to build the lead forwarder")?;

    Ok(Arc::new(AppState { storage, forwarder }))
}

/// Build the Axum router with all routes and middleware.
fn build_router(state: Arc<AppState>) -> Router {
    // CORS — the capture form is served from another origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    // Bound concurrent lead writes to keep a burst from exhausting the
    // storage medium.
    let api = routes::api_router().layer(ConcurrencyLimitLayer::new(64));

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .with_state(state)
}

/// Create the directory a storage file lives in, if needed.
fn ensure_parent_dir(path: &str) -> anyhow::Result<()> {
    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create storage directory {}", parent.display()))?;
        }
    }
    Ok(())
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        if let Ok(mut sig) =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        {
            sig.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received, stopping server");
}
