//! Application builder: wires router, middleware and state into an Axum app.

use axum::Router;

use codekeep_core::config::{AppConfig, CorsConfig};
use codekeep_core::error::AppError;
use codekeep_database::DatabasePool;

use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState, cors_config: &CorsConfig) -> Router {
    build_router(state).layer(build_cors_layer(cors_config))
}

/// Runs the CodeKeep server until Ctrl+C.
///
/// Expects a connected pool with migrations already applied.
pub async fn run_server(config: AppConfig, db: DatabasePool) -> Result<(), AppError> {
    tracing::info!("Starting CodeKeep server...");

    let state = AppState::new(config.clone(), db.clone())?;
    let account = state.account_service.default_account().await?;
    tracing::info!(
        username = %account.username,
        assistant = %state.assist_service.backend(),
        "Default account ready"
    );

    let app = build_app(state, &config.server.cors);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("CodeKeep server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    db.close().await;
    tracing::info!("CodeKeep server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}
