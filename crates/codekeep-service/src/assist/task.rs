//! Assistant task names and payloads.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use codekeep_core::error::AppError;
use codekeep_core::traits::{BugReport, ImageTheme, SnippetDetails};

/// The tasks the assistant can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssistTask {
    Explain,
    Convert,
    FindBugs,
    GenerateTests,
    SuggestDetails,
    RenderImage,
}

impl AssistTask {
    /// Wire name of the task.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Explain => "explain",
            Self::Convert => "convert",
            Self::FindBugs => "find-bugs",
            Self::GenerateTests => "generate-tests",
            Self::SuggestDetails => "suggest-details",
            Self::RenderImage => "render-image",
        }
    }
}

impl fmt::Display for AssistTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssistTask {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "explain" => Ok(Self::Explain),
            "convert" => Ok(Self::Convert),
            "find-bugs" => Ok(Self::FindBugs),
            "generate-tests" => Ok(Self::GenerateTests),
            "suggest-details" => Ok(Self::SuggestDetails),
            "render-image" => Ok(Self::RenderImage),
            other => Err(AppError::validation(format!("Unknown assistant task '{other}'"))),
        }
    }
}

/// Inputs for a single assistant call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistRequest {
    pub code: String,
    pub language: String,
    /// Required by `convert`.
    #[serde(default)]
    pub target_language: Option<String>,
    /// Used by `render-image`.
    #[serde(default)]
    pub theme: Option<ImageTheme>,
}

/// Result of an assistant call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AssistOutput {
    /// Markdown or code text.
    Text(String),
    Bugs(Vec<BugReport>),
    Details(SnippetDetails),
    /// Image as a data URI.
    Image(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_roundtrip_names() {
        for task in [
            AssistTask::Explain,
            AssistTask::Convert,
            AssistTask::FindBugs,
            AssistTask::GenerateTests,
            AssistTask::SuggestDetails,
            AssistTask::RenderImage,
        ] {
            assert_eq!(task.as_str().parse::<AssistTask>().unwrap(), task);
            assert_eq!(
                serde_json::to_value(task).unwrap(),
                serde_json::Value::String(task.as_str().to_string())
            );
        }
        assert!("summarize".parse::<AssistTask>().is_err());
    }

    #[test]
    fn test_output_shape() {
        let json = serde_json::to_value(AssistOutput::Text("hi".into())).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "text", "value": "hi"}));
    }
}
