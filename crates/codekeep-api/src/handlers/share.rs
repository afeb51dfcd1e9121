//! Public share access (no authentication).

use axum::Json;
use axum::extract::{Path, State};

use codekeep_entity::snippet::PublicSnippet;

use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/s/{share_id}
///
/// Private snippets and unknown tokens both answer 404 with the same body.
pub async fn get_shared(
    State(state): State<AppState>,
    Path(share_id): Path<String>,
) -> ApiResult<Json<PublicSnippet>> {
    let snippet = state.access_service.resolve_public(&share_id).await?;
    Ok(Json(snippet))
}
