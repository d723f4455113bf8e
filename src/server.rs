//! Server setup and initialization
//!
//! Wires together storage, shared state and HTTP routes, and provides the
//! application factory used by `main` and the integration tests.

use crate::{
    api::{create_person_routes, create_project_routes, docs::get_openapi_json, AppState},
    config::Config,
    storage::{PersistenceGateway, SqliteGateway},
};
use anyhow::Result;
use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Build the router for an already-initialised gateway
pub fn build_router(gateway: Arc<dyn PersistenceGateway>) -> Router {
    let state = AppState::new(gateway);

    Router::new()
        // Health check endpoint
        .route("/healthz", get(health_check))
        // API surface description
        .route("/api-docs/openapi.json", get(get_openapi_json))
        .merge(create_person_routes())
        .merge(create_project_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Create the main Axum application
///
/// Opens the configured database, creates the schema and mounts all routes.
pub async fn create_app(config: Config) -> Result<Router> {
    tracing::info!("🏗️ Initializing persistence gateway");
    let gateway = SqliteGateway::connect(&config.database)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize database: {:#}", e))?;

    tracing::info!("📡 Creating HTTP router with all endpoints");
    let app = build_router(Arc::new(gateway));

    tracing::info!("✅ Application initialized successfully");
    Ok(app)
}

/// Start the HTTP server with the given configuration
pub async fn start_server(config: Config) -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(true)
        .with_level(true)
        .init();

    tracing::info!("Starting Lattes API server...");

    let app = create_app(config.clone()).await?;

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&bind_addr).await?;

    tracing::info!("Server listening on http://{}", bind_addr);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

/// Health check endpoint handler
async fn health_check() -> &'static str {
    "ok"
}
