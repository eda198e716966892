/// Server setup and initialization
///
/// Wires together storage and HTTP routes, and provides the application
/// factory used by both the binary and the integration tests.

use crate::{
    api::{create_reservation_routes, create_table_routes, AppState},
    config::Config,
    db,
};
use anyhow::Result;
use axum::{routing::get, Router};
use sqlx::SqlitePool;
use tokio::net::TcpListener;

/// Create the main Axum application with all routes
///
/// Takes an already-initialized pool so tests can hand in an in-memory
/// database.
pub fn create_app(pool: SqlitePool) -> Router {
    let state = AppState::new(pool);

    Router::new()
        // Health check endpoint
        .route("/healthz", get(health_check))
        // Reservation management routes
        .merge(create_reservation_routes().with_state(state.clone()))
        // Table management routes
        .merge(create_table_routes().with_state(state))
}

/// Start the HTTP server with the given configuration
pub async fn start_server(config: Config) -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(true)
        .with_level(true)
        .init();

    tracing::info!("Starting seatwell server...");

    let pool = db::connect(&config.database.data_dir).await?;
    db::init_schema(&pool).await?;
    tracing::info!("✅ Database schema ready");

    let app = create_app(pool);

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
