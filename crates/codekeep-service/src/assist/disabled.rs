//! Assistant backend used when no endpoint is configured.

use async_trait::async_trait;

use codekeep_core::error::AppError;
use codekeep_core::result::AppResult;
use codekeep_core::traits::{Assistant, BugReport, ImageTheme, SnippetDetails};

/// Rejects every call with an external-service error.
#[derive(Debug, Clone, Default)]
pub struct DisabledAssistant;

impl DisabledAssistant {
    fn unavailable<T>() -> AppResult<T> {
        Err(AppError::external_service("Assistant is not configured"))
    }
}

#[async_trait]
impl Assistant for DisabledAssistant {
    fn name(&self) -> &str {
        "disabled"
    }

    async fn explain(&self, _code: &str, _language: &str) -> AppResult<String> {
        Self::unavailable()
    }

    async fn convert(&self, _code: &str, _from: &str, _to: &str) -> AppResult<String> {
        Self::unavailable()
    }

    async fn find_bugs(&self, _code: &str, _language: &str) -> AppResult<Vec<BugReport>> {
        Self::unavailable()
    }

    async fn generate_tests(&self, _code: &str, _language: &str) -> AppResult<String> {
        Self::unavailable()
    }

    async fn suggest_details(&self, _code: &str, _language: &str) -> AppResult<SnippetDetails> {
        Self::unavailable()
    }

    async fn render_image(
        &self,
        _code: &str,
        _language: &str,
        _theme: ImageTheme,
    ) -> AppResult<String> {
        Self::unavailable()
    }
}
