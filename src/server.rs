//! HTTP server initialization and runtime setup.
//!
//! Opens the configured link store, wires the link service and runs the Axum
//! server until Ctrl+C.

use crate::config::{Config, StorageBackend};
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::persistence::{
    FileLinkRepository, MemoryLinkRepository, PgLinkRepository,
};
use crate::routes::app_router;
use crate::state::{AppState, DynLinkService};

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - The link repository (PostgreSQL with migrations, file, or memory)
/// - The link service
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - The file store cannot be read
/// - The trusted subnet is invalid
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let link_repository = open_repository(&config).await?;

    let link_service = DynLinkService::new(link_repository, config.base_url.clone())
        .with_delete_timeout(config.delete_timeout());
    let state = AppState::new(Arc::new(link_service), config.trusted_network()?);

    let app = app_router(state);

    let listener = tokio::net::TcpListener::bind(&config.server_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.server_address))?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Opens the link store selected by the configuration.
///
/// A PostgreSQL store that cannot be reached falls back to the file store if
/// a path is configured, otherwise to memory.
pub async fn open_repository(config: &Config) -> Result<Arc<dyn LinkRepository>> {
    if let StorageBackend::Postgres(ref dsn) = config.storage_backend() {
        match connect_postgres(config, dsn).await {
            Ok(repository) => {
                tracing::info!("Storage: PostgreSQL");
                return Ok(Arc::new(repository));
            }
            Err(e) => {
                tracing::error!(error = %format!("{e:#}"), "PostgreSQL unavailable, falling back");
            }
        }
    }

    match config.file_storage_path {
        Some(ref path) => {
            let repository = FileLinkRepository::open(path)
                .await
                .with_context(|| format!("Failed to open file store {path}"))?;
            tracing::info!("Storage: file ({})", path);
            Ok(Arc::new(repository))
        }
        None => {
            tracing::info!("Storage: memory");
            Ok(Arc::new(MemoryLinkRepository::new()))
        }
    }
}

async fn connect_postgres(config: &Config, dsn: &str) -> Result<PgLinkRepository> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(dsn)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;

    Ok(PgLinkRepository::new(Arc::new(pool)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
