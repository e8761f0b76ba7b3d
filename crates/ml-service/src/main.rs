//! ML Service - waste quantity, waste type and eco score predictions
//!
//! Loads the model artifacts once at startup and serves them over HTTP.

use anyhow::Result;
use ml_service::{api, config::ServiceConfig};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use waste_ml_lib::ModelStore;

const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and env filter
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().json())
        .init();

    info!("Starting ml-service");

    let config = ServiceConfig::load()?;
    info!(models_dir = %config.models_dir.display(), "Service configured");

    // Missing artifacts only disable the endpoints that need them
    let store = Arc::new(ModelStore::load(&config.artifact_config()));
    let app_state = Arc::new(api::AppState::new(store.clone()));

    let addr = config.bind_address();
    app_state
        .logger
        .log_startup(SERVICE_VERSION, &addr, store.loaded_count());

    api::serve(&addr, app_state).await?;
    info!("Shut down");

    Ok(())
}
