//! Version history and restore handlers.

use axum::Json;
use axum::extract::{Path, State};

use codekeep_entity::snippet::Snippet;
use codekeep_entity::version::SnippetVersion;

use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{ApiKeyAuth, parse_uuid};
use crate::state::AppState;

/// GET /api/snippets/{id}/versions
pub async fn list_versions(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Vec<SnippetVersion>>>> {
    let id = parse_uuid(&id)?;
    let versions = state.version_service.list_for(&auth, id).await?;
    Ok(Json(ApiResponse::ok(versions)))
}

/// GET /api/versions/{id}
pub async fn get_version(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<SnippetVersion>>> {
    let id = parse_uuid(&id)?;
    let version = state.version_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(version)))
}

/// POST /api/versions/{id}/restore
pub async fn restore_version(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Snippet>>> {
    let id = parse_uuid(&id)?;
    let snippet = state.restore_service.restore(&auth, id).await?;
    Ok(Json(ApiResponse::ok(snippet)))
}
