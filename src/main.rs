//! Mr Burger site backend entry point.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use burger_site_backend::config::{Config, LogFormat};
use burger_site_backend::db::{self, ConfigRepository};
use burger_site_backend::{create_router, models, reconcile, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let json = config.log_format == LogFormat::Json;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .init();

    tracing::info!("Starting Mr Burger site backend");
    tracing::info!("Storage: {}", config.storage_target());
    tracing::info!("Static directory: {:?}", config.static_dir);
    tracing::info!("Bind address: {}", config.bind_addr);

    if config.admin_key.is_some() {
        tracing::info!("Admin key configured (SITE_ADMIN_KEY); document saves require it");
    }

    // Open storage, degrading to memory if the medium is unavailable
    let (backend, store_status) = db::open_store(&config).await;
    let repo = Arc::new(ConfigRepository::new(backend));

    // Reconcile before accepting traffic
    let outcome = reconcile::reconcile_store(&repo, &models::default_document()).await?;
    tracing::debug!(?outcome, "Reconciliation finished");

    // Create application state
    let state = AppState {
        repo,
        store_status: Arc::new(store_status),
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
