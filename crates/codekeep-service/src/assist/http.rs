//! Assistant backend that relays tasks to an HTTP endpoint.
//!
//! Each call posts `{"task": "<name>", ...inputs}` as JSON and reads the
//! task's output field from the JSON reply.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::debug;

use codekeep_core::config::AssistantConfig;
use codekeep_core::error::{AppError, ErrorKind};
use codekeep_core::result::AppResult;
use codekeep_core::traits::{Assistant, BugReport, ImageTheme, SnippetDetails};

use crate::assist::task::AssistTask;

/// Posts assistant tasks to a configured endpoint.
#[derive(Debug, Clone)]
pub struct HttpAssistant {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

#[derive(Deserialize)]
struct ExplainReply {
    explanation: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConvertReply {
    converted_code: String,
}

#[derive(Deserialize)]
struct BugsReply {
    #[serde(default)]
    bugs: Vec<BugReport>,
}

#[derive(Deserialize)]
struct TestsReply {
    tests: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageReply {
    image_url: String,
}

impl HttpAssistant {
    /// Creates a relay from configuration.
    pub fn new(config: &AssistantConfig) -> AppResult<Self> {
        let endpoint = config.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(AppError::configuration(format!(
                "Assistant endpoint '{endpoint}' must be an http(s) URL"
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds.max(1)))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
        })
    }

    /// The endpoint tasks are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn call<T: DeserializeOwned>(&self, task: AssistTask, inputs: Value) -> AppResult<T> {
        let body = request_body(task, inputs);
        debug!(task = %task, endpoint = %self.endpoint, "Calling assistant");

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            AppError::with_source(ErrorKind::ExternalService, format!("Assistant {task} request failed"), e)
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::external_service(format!(
                "Assistant {task} returned HTTP {status}"
            )));
        }

        response.json::<T>().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Assistant {task} returned an unreadable reply"),
                e,
            )
        })
    }
}

/// Merge the task name into the input object.
fn request_body(task: AssistTask, inputs: Value) -> Value {
    let mut body = json!({ "task": task.as_str() });
    if let (Some(body), Value::Object(inputs)) = (body.as_object_mut(), inputs) {
        body.extend(inputs);
    }
    body
}

#[async_trait]
impl Assistant for HttpAssistant {
    fn name(&self) -> &str {
        "http"
    }

    async fn explain(&self, code: &str, language: &str) -> AppResult<String> {
        let reply: ExplainReply = self
            .call(AssistTask::Explain, json!({ "code": code, "language": language }))
            .await?;
        Ok(reply.explanation)
    }

    async fn convert(&self, code: &str, from: &str, to: &str) -> AppResult<String> {
        let reply: ConvertReply = self
            .call(
                AssistTask::Convert,
                json!({ "code": code, "sourceLanguage": from, "targetLanguage": to }),
            )
            .await?;
        Ok(reply.converted_code)
    }

    async fn find_bugs(&self, code: &str, language: &str) -> AppResult<Vec<BugReport>> {
        let reply: BugsReply = self
            .call(AssistTask::FindBugs, json!({ "code": code, "language": language }))
            .await?;
        Ok(reply.bugs)
    }

    async fn generate_tests(&self, code: &str, language: &str) -> AppResult<String> {
        let reply: TestsReply = self
            .call(AssistTask::GenerateTests, json!({ "code": code, "language": language }))
            .await?;
        Ok(reply.tests)
    }

    async fn suggest_details(&self, code: &str, language: &str) -> AppResult<SnippetDetails> {
        self.call(AssistTask::SuggestDetails, json!({ "code": code, "language": language }))
            .await
    }

    async fn render_image(&self, code: &str, language: &str, theme: ImageTheme) -> AppResult<String> {
        let reply: ImageReply = self
            .call(
                AssistTask::RenderImage,
                json!({ "code": code, "language": language, "theme": theme.as_str() }),
            )
            .await?;
        Ok(reply.image_url)
    }
}
