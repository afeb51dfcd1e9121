//! Assistant service: validation, timeouts and error mapping around an
//! [`Assistant`] backend.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use codekeep_core::config::AssistantConfig;
use codekeep_core::error::{AppError, ErrorKind};
use codekeep_core::traits::{Assistant, BugReport, ImageTheme, SnippetDetails};
use codekeep_entity::snippet::normalize_tags;

use crate::assist::disabled::DisabledAssistant;
use crate::assist::http::HttpAssistant;
use crate::assist::task::{AssistOutput, AssistRequest, AssistTask};

/// Relays code to the assistant backend.
#[derive(Debug, Clone)]
pub struct AssistService {
    /// Backend implementation.
    assistant: Arc<dyn Assistant>,
    /// Upper bound for a single call.
    timeout: Duration,
}

impl AssistService {
    /// Creates a new assist service.
    pub fn new(assistant: Arc<dyn Assistant>, timeout: Duration) -> Self {
        Self { assistant, timeout }
    }

    /// Picks the HTTP relay when enabled, otherwise the disabled backend.
    pub fn from_config(config: &AssistantConfig) -> Result<Self, AppError> {
        let assistant: Arc<dyn Assistant> = if config.enabled {
            Arc::new(HttpAssistant::new(config)?)
        } else {
            Arc::new(DisabledAssistant)
        };
        info!(backend = assistant.name(), "Assistant backend selected");
        Ok(Self::new(
            assistant,
            Duration::from_secs(config.timeout_seconds.max(1)),
        ))
    }

    /// Name of the active backend.
    pub fn backend(&self) -> &str {
        self.assistant.name()
    }

    pub async fn explain(&self, code: &str, language: &str) -> Result<String, AppError> {
        require_code(code)?;
        self.guarded(AssistTask::Explain, self.assistant.explain(code, language))
            .await
    }

    pub async fn convert(&self, code: &str, from: &str, to: &str) -> Result<String, AppError> {
        require_code(code)?;
        if to.trim().is_empty() {
            return Err(AppError::validation("Target language is required"));
        }
        self.guarded(AssistTask::Convert, self.assistant.convert(code, from, to))
            .await
    }

    pub async fn find_bugs(&self, code: &str, language: &str) -> Result<Vec<BugReport>, AppError> {
        require_code(code)?;
        self.guarded(AssistTask::FindBugs, self.assistant.find_bugs(code, language))
            .await
    }

    pub async fn generate_tests(&self, code: &str, language: &str) -> Result<String, AppError> {
        require_code(code)?;
        self.guarded(
            AssistTask::GenerateTests,
            self.assistant.generate_tests(code, language),
        )
        .await
    }

    /// Suggests a name, description and tags. Tags come back normalized.
    pub async fn suggest_details(
        &self,
        code: &str,
        language: &str,
    ) -> Result<SnippetDetails, AppError> {
        require_code(code)?;
        let mut details = self
            .guarded(
                AssistTask::SuggestDetails,
                self.assistant.suggest_details(code, language),
            )
            .await?;
        details.tags = normalize_tags(&details.tags);
        Ok(details)
    }

    pub async fn render_image(
        &self,
        code: &str,
        language: &str,
        theme: ImageTheme,
    ) -> Result<String, AppError> {
        require_code(code)?;
        self.guarded(
            AssistTask::RenderImage,
            self.assistant.render_image(code, language, theme),
        )
        .await
    }

    /// Runs a task named at runtime.
    pub async fn run(
        &self,
        task: AssistTask,
        request: &AssistRequest,
    ) -> Result<AssistOutput, AppError> {
        let code = request.code.as_str();
        let language = request.language.as_str();
        match task {
            AssistTask::Explain => self.explain(code, language).await.map(AssistOutput::Text),
            AssistTask::Convert => {
                let target = request.target_language.as_deref().unwrap_or_default();
                self.convert(code, language, target)
                    .await
                    .map(AssistOutput::Text)
            }
            AssistTask::FindBugs => self.find_bugs(code, language).await.map(AssistOutput::Bugs),
            AssistTask::GenerateTests => self
                .generate_tests(code, language)
                .await
                .map(AssistOutput::Text),
            AssistTask::SuggestDetails => self
                .suggest_details(code, language)
                .await
                .map(AssistOutput::Details),
            AssistTask::RenderImage => self
                .render_image(code, language, request.theme.unwrap_or_default())
                .await
                .map(AssistOutput::Image),
        }
    }

    async fn guarded<T, F>(&self, task: AssistTask, call: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, AppError>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                warn!(task = %task, backend = self.assistant.name(), error = %e, "Assistant call failed");
                if e.is(ErrorKind::ExternalService) {
                    Err(e)
                } else {
                    let message = format!("Assistant {task} failed: {}", e.message);
                    Err(AppError::with_source(ErrorKind::ExternalService, message, e))
                }
            }
            Err(_) => {
                warn!(task = %task, timeout_secs = self.timeout.as_secs(), "Assistant call timed out");
                Err(AppError::external_service(format!(
                    "Assistant {task} timed out after {}s",
                    self.timeout.as_secs()
                )))
            }
        }
    }
}

fn require_code(code: &str) -> Result<(), AppError> {
    if code.trim().is_empty() {
        Err(AppError::validation("Code is required"))
    } else {
        Ok(())
    }
}
