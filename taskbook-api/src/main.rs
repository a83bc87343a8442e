//! # Taskbook API Server
//!
//! REST API for managing users and the tasks they own.
//!
//! ## Architecture
//!
//! The API server is built with Axum and provides:
//! - User endpoints (create, list, get, delete)
//! - Task endpoints (create, get, list per user, update completion, delete)
//! - Health check
//!
//! Storage is PostgreSQL by default (migrations run at startup); set
//! `STORAGE_BACKEND=memory` to run without a database.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p taskbook-api
//! ```

use anyhow::Context;
use std::sync::Arc;
use taskbook_api::{
    app::{build_router, AppState},
    config::{Config, LogFormat, StorageBackend},
};
use taskbook_shared::{
    db::{migrations, pool},
    store::{memory::MemoryStore, postgres::PgStore, SharedStore},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "taskbook_api=debug,taskbook_shared=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    tracing::info!(
        "Taskbook API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let (store, db_pool) = match config.storage {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on shutdown");
            (Arc::new(MemoryStore::new()) as SharedStore, None)
        }
        StorageBackend::Postgres => {
            tracing::info!(url = %config.database.redacted_url(), "Connecting to database");

            if let Err(err) = migrations::ensure_database_exists(&config.database.url).await {
                tracing::warn!(error = %err, "Could not ensure database exists");
            }

            let db_pool = pool::create_pool(config.database.clone())
                .await
                .context("failed to connect to database")?;
            migrations::run_migrations(&db_pool)
                .await
                .context("failed to run database migrations")?;

            (
                Arc::new(PgStore::new(db_pool.clone())) as SharedStore,
                Some(db_pool),
            )
        }
    };

    let address = config.bind_address();
    let app = build_router(AppState::new(store, config));

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {}", address))?;
    tracing::info!("Server listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(db_pool) = db_pool {
        pool::close_pool(db_pool).await;
    }

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, draining connections...");
}
