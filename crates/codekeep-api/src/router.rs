//! Route definitions for the CodeKeep HTTP API.
//!
//! All routes are organized by resource and mounted under `/api`.
//! Every management route authenticates with the `ApiKeyAuth` extractor;
//! health and share links are public.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with all routes, request logging and tracing.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(health_routes())
        .merge(v1_routes())
        .merge(account_routes())
        .merge(snippet_routes())
        .merge(version_routes())
        .merge(folder_routes())
        .merge(stats_routes())
        .merge(assist_routes())
        .merge(share_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Read-only API for external clients.
fn v1_routes() -> Router<AppState> {
    Router::new().route("/v1/snippets", get(handlers::v1::list_snippets))
}

fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/account", get(handlers::account::get_account))
        .route("/account/api-key", post(handlers::account::rotate_api_key))
}

fn snippet_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/snippets",
            get(handlers::snippet::list_snippets).post(handlers::snippet::create_snippet),
        )
        .route(
            "/snippets/{id}",
            get(handlers::snippet::get_snippet)
                .put(handlers::snippet::update_snippet)
                .delete(handlers::snippet::delete_snippet),
        )
        .route("/snippets/{id}/sharing", put(handlers::snippet::set_sharing))
}

fn version_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/snippets/{id}/versions",
            get(handlers::version::list_versions),
        )
        .route("/versions/{id}", get(handlers::version::get_version))
        .route(
            "/versions/{id}/restore",
            post(handlers::version::restore_version),
        )
}

fn folder_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/folders",
            get(handlers::folder::list_folders).post(handlers::folder::create_folder),
        )
        .route(
            "/folders/{id}",
            put(handlers::folder::rename_folder).delete(handlers::folder::delete_folder),
        )
}

fn stats_routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(handlers::stats::dashboard))
        .route("/stats/activity", get(handlers::stats::activity))
}

fn assist_routes() -> Router<AppState> {
    Router::new().route("/assist/{task}", post(handlers::assist::run_task))
}

/// Anonymous share links.
fn share_routes() -> Router<AppState> {
    Router::new().route("/s/{share_id}", get(handlers::share::get_shared))
}
