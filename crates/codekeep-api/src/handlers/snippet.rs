//! Snippet CRUD and sharing handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use codekeep_entity::snippet::Snippet;

use crate::dto::request::{
    CreateSnippetRequest, ListSnippetsQuery, SharingRequest, UpdateSnippetRequest,
};
use crate::dto::response::{ApiResponse, SharingResponse, SnippetListResponse};
use crate::dto::validate_request;
use crate::error::ApiResult;
use crate::extractors::{ApiKeyAuth, parse_uuid};
use crate::state::AppState;

/// GET /api/snippets?search=&folder=&sort=
pub async fn list_snippets(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Query(query): Query<ListSnippetsQuery>,
) -> ApiResult<Json<ApiResponse<SnippetListResponse>>> {
    let query = query.into_browse()?;
    let view = state.snippet_service.browse(&auth, &query).await?;
    let browse_state = view.state().clone();
    let items = view.into_visible();

    Ok(Json(ApiResponse::ok(SnippetListResponse {
        total: items.len(),
        items,
        state: browse_state,
    })))
}

/// POST /api/snippets
pub async fn create_snippet(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Json(req): Json<CreateSnippetRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Snippet>>)> {
    validate_request(&req)?;
    let snippet = state.snippet_service.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(snippet))))
}

/// GET /api/snippets/{id}
pub async fn get_snippet(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Snippet>>> {
    let id = parse_uuid(&id)?;
    let snippet = state.snippet_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(snippet)))
}

/// PUT /api/snippets/{id}
///
/// Records a version of the current state before applying the changes.
pub async fn update_snippet(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Path(id): Path<String>,
    Json(req): Json<UpdateSnippetRequest>,
) -> ApiResult<Json<ApiResponse<Snippet>>> {
    let id = parse_uuid(&id)?;
    req.validate()?;
    let changes = req.into_update();
    let snippet = state.snippet_service.update(&auth, id, &changes).await?;
    Ok(Json(ApiResponse::ok(snippet)))
}

/// DELETE /api/snippets/{id}
pub async fn delete_snippet(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Path(id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    let id = parse_uuid(&id)?;
    state.snippet_service.delete(&auth, id).await?;
    Ok(Json(
        serde_json::json!({ "success": true, "data": { "message": "Snippet deleted" } }),
    ))
}

/// PUT /api/snippets/{id}/sharing
pub async fn set_sharing(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Path(id): Path<String>,
    Json(req): Json<SharingRequest>,
) -> ApiResult<Json<ApiResponse<SharingResponse>>> {
    let id = parse_uuid(&id)?;
    let snippet = state
        .snippet_service
        .set_sharing(&auth, id, req.is_public)
        .await?;
    Ok(Json(ApiResponse::ok(SharingResponse::new(
        &snippet,
        &state.config.sharing,
    ))))
}
