mod admin;
mod auth;
mod config;
mod errors;
mod models;
mod notify;
mod resumes;
mod routes;
mod state;
mod storage;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, StorageKind};
use crate::notify::TracingMailer;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::{FileStorage, MemoryStorage, RedisStorage, StorageBackend};
use crate::store::Store;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ResuManage API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize storage and the store
    let storage = build_storage(&config).await?;
    let store = Store::new(storage, Arc::new(TracingMailer), config.app_base_url.clone());

    // Build app state
    let state = AppState {
        store,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs the storage backend selected by `STORAGE_BACKEND`.
async fn build_storage(config: &Config) -> Result<Arc<dyn StorageBackend>> {
    let storage: Arc<dyn StorageBackend> = match config.storage_backend {
        StorageKind::Memory => {
            info!("Using in-memory storage; state is lost on shutdown");
            Arc::new(MemoryStorage::new())
        }
        StorageKind::File => Arc::new(FileStorage::create(config.data_dir.clone()).await?),
        StorageKind::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .context("REDIS_URL is required when STORAGE_BACKEND=redis")?;
            Arc::new(RedisStorage::connect(url).await?)
        }
    };
    Ok(storage)
}
