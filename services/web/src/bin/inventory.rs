//! services/web/src/bin/inventory.rs

use inventory_core::commands::InventoryApp;
use inventory_core::ports::KeyValueStore;
use inventory_core::MemoryKeyValueStore;
use inventory_web::{
    adapters::{FileKeyValueStore, HtmlRenderer},
    config::{Config, StorageLocation},
    error::ApiError,
    web::{app_router, rest::ApiDoc, state::AppState},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Open the Key/Value Store ---
    let kv: Arc<dyn KeyValueStore> = match &config.storage {
        StorageLocation::Memory => {
            warn!("Using the in-memory store; nothing will survive a restart.");
            Arc::new(MemoryKeyValueStore::new())
        }
        StorageLocation::Directory(dir) => {
            info!("Using the file store at {}", dir.display());
            Arc::new(FileKeyValueStore::open(dir.clone())?)
        }
    };

    // --- 3. Load the Inventory ---
    let mut app = InventoryApp::load(kv, config.locale);
    if config.seed_sample_data {
        app.seed_if_empty()?;
    }
    info!("Loaded {} products.", app.store().len());

    // --- 4. Build the Shared AppState ---
    let renderer = Arc::new(HtmlRenderer::new()?);
    let app_state = Arc::new(AppState::new(app, renderer));

    // --- 5. Create the Web Router ---
    let app = app_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http());

    // --- 6. Start the Server ---
    info!("Starting server on http://{}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
