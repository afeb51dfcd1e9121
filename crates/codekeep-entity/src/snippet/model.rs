//! Snippet entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::version::SnippetSnapshot;

/// A stored code snippet. This is the canonical, mutable record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Snippet {
    /// Unique snippet identifier.
    pub id: Uuid,
    /// The account that owns this snippet.
    pub account_id: Uuid,
    /// Folder this snippet is filed under, if any.
    pub folder_id: Option<Uuid>,
    /// Snippet name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// The code itself.
    pub code: String,
    /// Language identifier (e.g. `python`).
    pub language: String,
    /// Normalized tag set.
    #[sqlx(json)]
    pub tags: Vec<String>,
    /// Whether the snippet is readable through its share link.
    pub is_public: bool,
    /// Stable share token, assigned the first time the snippet is made public.
    pub share_id: Option<String>,
    /// When the snippet was created.
    pub created_at: DateTime<Utc>,
    /// When any field of the snippet last changed.
    pub updated_at: DateTime<Utc>,
}

impl Snippet {
    /// Capture the editable fields as a snapshot.
    pub fn snapshot(&self) -> SnippetSnapshot {
        SnippetSnapshot {
            name: self.name.clone(),
            description: self.description.clone(),
            code: self.code.clone(),
            language: self.language.clone(),
            tags: self.tags.clone(),
        }
    }

    /// Overwrite the editable fields from a snapshot.
    ///
    /// `id`, `account_id`, `folder_id`, sharing state, and `created_at` are
    /// left untouched. The caller bumps `updated_at`.
    pub fn apply_snapshot(&mut self, snapshot: &SnippetSnapshot) {
        self.name = snapshot.name.clone();
        self.description = snapshot.description.clone();
        self.code = snapshot.code.clone();
        self.language = snapshot.language.clone();
        self.tags = snapshot.tags.clone();
    }

    /// Case-insensitive substring match over name, code, description, and tags.
    ///
    /// `needle` must already be lowercased. An empty needle matches everything.
    pub fn matches_search(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(needle)
            || self.code.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(needle))
    }

    /// Check the sharing invariant: public snippets always carry a share id.
    pub fn sharing_consistent(&self) -> bool {
        !self.is_public || self.share_id.is_some()
    }

    /// The anonymous view of this snippet.
    pub fn public_view(&self) -> PublicSnippet {
        PublicSnippet {
            name: self.name.clone(),
            description: self.description.clone(),
            code: self.code.clone(),
            language: self.language.clone(),
            tags: self.tags.clone(),
            share_id: self.share_id.clone().unwrap_or_default(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Data required to create a new snippet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSnippet {
    /// Snippet name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Code body.
    pub code: String,
    /// Language identifier.
    pub language: String,
    /// Tags (normalized on insert).
    #[serde(default)]
    pub tags: Vec<String>,
    /// Optional folder to file the snippet under.
    #[serde(default)]
    pub folder_id: Option<Uuid>,
}

/// What an anonymous share-link visitor sees. Carries no internal ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicSnippet {
    /// Snippet name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Code body.
    pub code: String,
    /// Language identifier.
    pub language: String,
    /// Tags.
    pub tags: Vec<String>,
    /// The share token the snippet was resolved by.
    pub share_id: String,
    /// When the snippet was created.
    pub created_at: DateTime<Utc>,
    /// When the snippet was last changed.
    pub updated_at: DateTime<Utc>,
}
