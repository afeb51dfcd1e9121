//! AI assistant collaborator trait.
//!
//! The assistant is a pure request/response collaborator: text in, text
//! (or an image data URI) out. Nothing in the snippet store depends on its
//! output for correctness; callers only relay results to the user.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// Details suggested for a snippet from its code alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetDetails {
    /// Suggested snippet name.
    pub name: String,
    /// Suggested one-paragraph description.
    pub description: String,
    /// Suggested tags (not yet normalized).
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A single issue reported by [`Assistant::find_bugs`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BugReport {
    /// 1-based line the issue was found on.
    pub line: u32,
    /// Short description of the problem.
    pub bug: String,
    /// How to fix it.
    pub suggestion: String,
}

/// Visual theme for rendered code images.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageTheme {
    #[default]
    Dark,
    Light,
    Synthwave,
    Pastel,
    Ocean,
    Forest,
}

impl ImageTheme {
    /// Lowercase name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
            Self::Synthwave => "synthwave",
            Self::Pastel => "pastel",
            Self::Ocean => "ocean",
            Self::Forest => "forest",
        }
    }
}

impl std::str::FromStr for ImageTheme {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            "synthwave" => Ok(Self::Synthwave),
            "pastel" => Ok(Self::Pastel),
            "ocean" => Ok(Self::Ocean),
            "forest" => Ok(Self::Forest),
            other => Err(AppError::validation(format!("Unknown image theme '{other}'"))),
        }
    }
}

/// Trait for AI assistant backends.
///
/// Implementations live in `codekeep-service` (an HTTP relay and a
/// disabled stub). Errors from implementations are mapped to
/// `ErrorKind::ExternalService` by the caller.
#[async_trait]
pub trait Assistant: Send + Sync + std::fmt::Debug + 'static {
    /// Return the backend name (e.g., "http", "disabled").
    fn name(&self) -> &str;

    /// Explain what a piece of code does.
    async fn explain(&self, code: &str, language: &str) -> AppResult<String>;

    /// Convert code from one language to another.
    async fn convert(&self, code: &str, from: &str, to: &str) -> AppResult<String>;

    /// Point out likely bugs in a piece of code.
    async fn find_bugs(&self, code: &str, language: &str) -> AppResult<Vec<BugReport>>;

    /// Generate unit tests for a piece of code.
    async fn generate_tests(&self, code: &str, language: &str) -> AppResult<String>;

    /// Suggest a name, description, and tags for a piece of code.
    async fn suggest_details(&self, code: &str, language: &str) -> AppResult<SnippetDetails>;

    /// Render the code as an image, returned as a data URI.
    async fn render_image(
        &self,
        code: &str,
        language: &str,
        theme: ImageTheme,
    ) -> AppResult<String>;
}
