//! Assistant relay handler.

use axum::Json;
use axum::extract::{Path, State};

use codekeep_service::assist::{AssistOutput, AssistRequest, AssistTask};

use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::ApiKeyAuth;
use crate::state::AppState;

/// POST /api/assist/{task}
///
/// `task` is one of `explain`, `convert`, `find-bugs`, `generate-tests`,
/// `suggest-details` or `render-image`.
pub async fn run_task(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Path(task): Path<String>,
    Json(req): Json<AssistRequest>,
) -> ApiResult<Json<ApiResponse<AssistOutput>>> {
    let task: AssistTask = task.parse()?;
    tracing::debug!(account_id = %auth.account_id, task = %task, "Assistant request");
    let output = state.assist_service.run(task, &req).await?;
    Ok(Json(ApiResponse::ok(output)))
}
