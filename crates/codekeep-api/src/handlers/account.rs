//! Account handlers.

use axum::Json;
use axum::extract::State;

use codekeep_entity::account::Account;

use crate::dto::response::{AccountResponse, ApiResponse};
use crate::error::ApiResult;
use crate::extractors::ApiKeyAuth;
use crate::state::AppState;

fn to_response(account: Account) -> AccountResponse {
    AccountResponse {
        id: account.id,
        username: account.username,
        api_key: account.api_key,
        created_at: account.created_at,
    }
}

/// GET /api/account
pub async fn get_account(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
) -> ApiResult<Json<ApiResponse<AccountResponse>>> {
    let account = state.account_service.current(&auth).await?;
    Ok(Json(ApiResponse::ok(to_response(account))))
}

/// POST /api/account/api-key
///
/// Issues a new key. The key used for this request stops working.
pub async fn rotate_api_key(
    State(state): State<AppState>,
    auth: ApiKeyAuth,
) -> ApiResult<Json<ApiResponse<AccountResponse>>> {
    let account = state.account_service.rotate_api_key(&auth).await?;
    Ok(Json(ApiResponse::ok(to_response(account))))
}
