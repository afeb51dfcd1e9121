//! `ApiKeyAuth` extractor: resolves the bearer API key to an account.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use codekeep_core::error::AppError;
use codekeep_service::context::AccountContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated account context available in handlers.
#[derive(Debug, Clone)]
pub struct ApiKeyAuth(pub AccountContext);

impl ApiKeyAuth {
    /// Returns the inner `AccountContext`.
    pub fn context(&self) -> &AccountContext {
        &self.0
    }
}

impl std::ops::Deref for ApiKeyAuth {
    type Target = AccountContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Pull the key out of an `Authorization: Bearer <key>` header value.
pub fn bearer_key(header: Option<&str>) -> Result<&str, AppError> {
    let header =
        header.ok_or_else(|| AppError::authentication("Missing Authorization header"))?;
    let key = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;
    if key.is_empty() {
        return Err(AppError::authentication("Missing API key"));
    }
    Ok(key)
}

impl FromRequestParts<AppState> for ApiKeyAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        let key = bearer_key(header).inspect_err(|e| {
            tracing::warn!(path = %parts.uri.path(), reason = %e.message, "Rejected request");
        })?;

        let account = state.account_service.authenticate(key).await?;
        Ok(ApiKeyAuth(AccountContext::from(&account)))
    }
}
