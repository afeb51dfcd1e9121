//! Folder handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use codekeep_entity::folder::Folder;

use crate::dto::request::FolderRequest;
use crate::dto::response::ApiResponse;
use crate::dto::validate_request;
use crate::error::ApiResult;
use crate::extractors::{ApiKeyAuth, parse_uuid};
use crate::state::AppState;

/// GET /api/folders
pub async fn list_folders(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
) -> ApiResult<Json<ApiResponse<Vec<Folder>>>> {
    let folders = state.folder_service.list(&auth).await?;
    Ok(Json(ApiResponse::ok(folders)))
}

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Json(req): Json<FolderRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Folder>>)> {
    validate_request(&req)?;
    let folder = state.folder_service.create(&auth, &req.name).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(folder))))
}

/// PUT /api/folders/{id}
pub async fn rename_folder(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Path(id): Path<String>,
    Json(req): Json<FolderRequest>,
) -> ApiResult<Json<ApiResponse<Folder>>> {
    let id = parse_uuid(&id)?;
    validate_request(&req)?;
    let folder = state.folder_service.rename(&auth, id, &req.name).await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// DELETE /api/folders/{id}
///
/// Snippets in the folder are kept and detached.
pub async fn delete_folder(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Path(id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    let id = parse_uuid(&id)?;
    state.folder_service.delete(&auth, id).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "Folder deleted" } }),
    ))
}
