//! Version entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The editable fields of a snippet, frozen at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetSnapshot {
    pub name: String,
    pub description: String,
    pub code: String,
    pub language: String,
    pub tags: Vec<String>,
}

/// An immutable history entry for a snippet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SnippetVersion {
    /// Unique version identifier.
    pub id: Uuid,
    /// Snippet this version was taken from.
    pub snippet_id: Uuid,
    /// Name at capture time.
    pub name: String,
    /// Description at capture time.
    pub description: String,
    /// Code at capture time.
    pub code: String,
    /// Language at capture time.
    pub language: String,
    /// Tags at capture time.
    #[sqlx(json)]
    pub tags: Vec<String>,
    /// When the version was recorded.
    pub created_at: DateTime<Utc>,
}

impl SnippetVersion {
    /// The snapshot this version holds.
    pub fn snapshot(&self) -> SnippetSnapshot {
        SnippetSnapshot {
            name: self.name.clone(),
            description: self.description.clone(),
            code: self.code.clone(),
            language: self.language.clone(),
            tags: self.tags.clone(),
        }
    }
}
