//! Dashboard statistics handlers.

use axum::Json;
use axum::extract::{Query, State};

use codekeep_service::stats::{ActivityCalendar, DashboardStats};

use crate::dto::request::ActivityQuery;
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::ApiKeyAuth;
use crate::state::AppState;

/// GET /api/stats
pub async fn dashboard(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
) -> ApiResult<Json<ApiResponse<DashboardStats>>> {
    let stats = state.stats_service.dashboard(&auth).await?;
    Ok(Json(ApiResponse::ok(stats)))
}

/// GET /api/stats/activity?year=
pub async fn activity(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
    Query(query): Query<ActivityQuery>,
) -> ApiResult<Json<ApiResponse<ActivityCalendar>>> {
    let calendar = state.stats_service.activity(&auth, query.year).await?;
    Ok(Json(ApiResponse::ok(calendar)))
}
