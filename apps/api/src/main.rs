mod config;
mod editor;
mod errors;
mod generation;
mod models;
mod persistence;
mod render;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, StorageBackend};
use crate::generation::random::{RandomSource, SeededRandom};
use crate::models::ResumeDocument;
use crate::persistence::{FileStore, KeyValueStore, MemoryStore, Persistence, RedisStore};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume builder v{}", env!("CARGO_PKG_VERSION"));

    let store = open_store(&config).await?;
    info!("Storage backend: {}", store.backend());
    let persistence = Arc::new(Persistence::new(store, config.storage_key.clone()));

    // Saved document overlaid onto the defaults; anything unreadable keeps the defaults.
    let document = persistence.load().await.unwrap_or_else(ResumeDocument::default);

    let rng: Box<dyn RandomSource> = match config.generator_seed {
        Some(seed) => {
            info!("Text generator seeded with {seed}");
            Box::new(SeededRandom::from_seed(seed))
        }
        None => Box::new(SeededRandom::from_entropy()),
    };

    let state = AppState::new(document, persistence, rng, config.clone());
    let autosaver = Arc::clone(&state.autosaver);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Edits inside the debounce window would otherwise be lost.
    match autosaver.flush().await {
        Ok(true) => info!("Flushed pending save on shutdown"),
        Ok(false) => {}
        Err(e) => warn!("Failed to flush pending save on shutdown: {e}"),
    }

    Ok(())
}

/// Builds the key-value store selected by `STORAGE_BACKEND`.
async fn open_store(config: &Config) -> Result<Arc<dyn KeyValueStore>> {
    let store: Arc<dyn KeyValueStore> = match config.storage_backend {
        StorageBackend::File => {
            let store = FileStore::open(config.data_dir.clone()).with_context(|| {
                format!("Failed to open data dir {}", config.data_dir.display())
            })?;
            info!("Storing documents in {}", store.dir().display());
            Arc::new(store)
        }
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
        StorageBackend::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .context("REDIS_URL is required for the redis backend")?;
            Arc::new(
                RedisStore::connect(url)
                    .await
                    .context("Failed to connect to Redis")?,
            )
        }
    };
    Ok(store)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
