//! Planets server binary

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use planets::api::{create_router, ApiOptions, AppState};
use planets::catalog::SwapiClient;
use planets::config::{AppConfig, LogFormat};
use planets::storage::{create_storage, StorageBackend};
use planets::store::DocumentStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;

    init_tracing(&config)?;

    let storage_config = config
        .storage_runtime()
        .context("invalid storage configuration")?;
    let collection = config
        .storage
        .collection()
        .context("invalid storage configuration")?;

    let storage_backend = create_storage(storage_config).await?;
    let storage: Arc<dyn StorageBackend> = Arc::from(storage_backend);
    let store = Arc::new(DocumentStore::with_collection(storage, collection));

    let catalog_url = config.catalog.base_url()?;
    tracing::info!(
        url = %catalog_url,
        timeout_secs = config.catalog.timeout_secs,
        "Using planet catalog",
    );
    let catalog = Arc::new(
        SwapiClient::new(catalog_url, config.catalog.timeout())
            .context("failed to build catalog client")?,
    );

    let options = ApiOptions::from(&config.api);
    if options.null_body_for_missing_planet {
        tracing::warn!("Reads of unknown planets will answer 200 with a null body");
    }

    let state = AppState::new(store, catalog).with_options(options);
    let router = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    tracing::info!(%addr, "Listening for HTTP traffic");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.logging.level.clone()))
        .unwrap_or_else(|_| EnvFilter::new("planets=info,tower_http=info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format {
        LogFormat::Json => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()?;
        }
        LogFormat::Text => {
            registry.with(tracing_subscriber::fmt::layer()).try_init()?;
        }
    }

    Ok(())
}
