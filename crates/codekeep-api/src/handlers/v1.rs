//! Versioned read API for external clients.

use axum::Json;
use axum::extract::State;

use codekeep_entity::snippet::Snippet;

use crate::error::ApiResult;
use crate::extractors::ApiKeyAuth;
use crate::state::AppState;

/// GET /api/v1/snippets
///
/// Returns the account's snippets newest first as a bare JSON array.
pub async fn list_snippets(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
) -> ApiResult<Json<Vec<Snippet>>> {
    let snippets = state.snippet_service.list(&auth).await?;
    Ok(Json(snippets))
}
