//! Wedding Gift Registry Backend
//!
//! A REST backend over a pluggable gift store: SQLite with live change
//! notifications, or a plain JSON file.

mod api;
mod config;
mod errors;
mod manager;
mod models;
mod store;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::{Config, StoreBackend};
use manager::GiftListManager;
use store::{GiftStore, JsonFileStore, SqliteGiftStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub manager: Arc<GiftListManager>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Gift Registry Backend");
    tracing::info!("Store backend: {:?}", config.store_backend);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Initialize the selected store backend
    let store: Arc<dyn GiftStore> = match config.store_backend {
        StoreBackend::Sqlite => {
            tracing::info!("Database path: {:?}", config.db_path);
            let pool = store::init_database(&config.db_path).await?;
            Arc::new(SqliteGiftStore::new(pool))
        }
        StoreBackend::File => {
            tracing::info!("File path: {:?}", config.file_path);
            Arc::new(JsonFileStore::open(config.file_path.clone())?)
        }
    };

    // Create the manager and load the initial list
    let manager = Arc::new(GiftListManager::new(store));
    manager.refresh().await?;
    manager.spawn_watcher();

    let gift_count = manager.view().await.len();
    tracing::info!("Loaded {} gifts", gift_count);

    // Create application state
    let state = AppState {
        manager,
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

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration: the browser page is the intended caller
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes
    let api_routes = Router::new()
        // Gifts
        .route("/gifts", get(api::list_gifts))
        .route("/gifts", post(api::add_gift))
        .route("/gifts/clear", post(api::clear_gifts))
        .route("/gifts/{id}/reserve", post(api::reserve_gift))
        .route("/gifts/{id}", delete(api::remove_gift))
        // Snapshot backup/restore
        .route("/snapshot", get(api::export_snapshot))
        .route("/snapshot", post(api::import_snapshot));

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
