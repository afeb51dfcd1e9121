//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use codekeep_core::error::AppError;
use codekeep_core::types::SortOption;
use codekeep_entity::snippet::{CreateSnippet, FieldUpdate, UpdateSnippet, parse_tag_list};
use codekeep_service::BrowseQuery;

/// Minimum snippet name length accepted over HTTP.
pub const MIN_NAME_LEN: usize = 2;

/// Runs `validator` rules and maps failures to a validation error.
pub fn validate_request<T: Validate>(req: &T) -> Result<(), AppError> {
    req.validate()
        .map_err(|e| AppError::validation(format!("Validation failed: {e}")))
}

/// Tags given either as a JSON list or as one comma-separated string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagsInput {
    List(Vec<String>),
    Csv(String),
}

impl Default for TagsInput {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl TagsInput {
    /// Flattens into a plain list. Normalization happens in the service.
    pub fn into_tags(self) -> Vec<String> {
        match self {
            Self::List(tags) => tags,
            Self::Csv(raw) => parse_tag_list(&raw),
        }
    }
}

/// Create snippet request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSnippetRequest {
    /// Snippet name.
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,
    /// Description.
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    /// Source code.
    #[validate(length(min = 1, message = "Code is required"))]
    pub code: String,
    /// Language label.
    #[validate(length(min = 1, message = "Language is required"))]
    pub language: String,
    /// Tags.
    #[serde(default)]
    pub tags: TagsInput,
    /// Optional folder.
    #[serde(default)]
    pub folder_id: Option<Uuid>,
}

impl From<CreateSnippetRequest> for CreateSnippet {
    fn from(req: CreateSnippetRequest) -> Self {
        CreateSnippet {
            name: req.name,
            description: req.description,
            code: req.code,
            language: req.language,
            tags: req.tags.into_tags(),
            folder_id: req.folder_id,
        }
    }
}

/// Update snippet request.
///
/// Omitted fields stay unchanged; `null` clears the field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSnippetRequest {
    #[serde(default)]
    pub name: FieldUpdate<String>,
    #[serde(default)]
    pub description: FieldUpdate<String>,
    #[serde(default)]
    pub code: FieldUpdate<String>,
    #[serde(default)]
    pub language: FieldUpdate<String>,
    #[serde(default)]
    pub tags: FieldUpdate<TagsInput>,
    #[serde(default)]
    pub folder_id: FieldUpdate<Uuid>,
}

impl UpdateSnippetRequest {
    /// Applies the same length rules as [`CreateSnippetRequest`] to the
    /// fields being set.
    pub fn validate(&self) -> Result<(), AppError> {
        if let FieldUpdate::SetTo(name) = &self.name {
            if name.trim().chars().count() < MIN_NAME_LEN {
                return Err(AppError::validation(
                    "Validation failed: Name must be at least 2 characters",
                ));
            }
        }
        let description_emptied = match &self.description {
            FieldUpdate::SetTo(description) => description.is_empty(),
            FieldUpdate::Clear => true,
            FieldUpdate::Unchanged => false,
        };
        if description_emptied {
            return Err(AppError::validation(
                "Validation failed: Description is required",
            ));
        }
        Ok(())
    }

    /// Converts into the entity-level update.
    pub fn into_update(self) -> UpdateSnippet {
        let tags = match self.tags {
            FieldUpdate::Unchanged => FieldUpdate::Unchanged,
            FieldUpdate::SetTo(tags) => FieldUpdate::SetTo(tags.into_tags()),
            FieldUpdate::Clear => FieldUpdate::Clear,
        };
        UpdateSnippet {
            name: self.name,
            description: self.description,
            code: self.code,
            language: self.language,
            tags,
            folder_id: self.folder_id,
        }
    }
}

/// Sharing toggle request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharingRequest {
    pub is_public: bool,
}

/// Create or rename folder request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FolderRequest {
    /// Folder name.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// Query parameters for `GET /api/snippets`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListSnippetsQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub folder: Option<Uuid>,
    #[serde(default)]
    pub sort: Option<String>,
}

impl ListSnippetsQuery {
    /// Parses into a browse query; an unknown sort name is a validation
    /// error.
    pub fn into_browse(self) -> Result<BrowseQuery, AppError> {
        let sort = match self.sort.as_deref() {
            None | Some("") => SortOption::default(),
            Some(raw) => raw.parse::<SortOption>()?,
        };
        Ok(BrowseQuery {
            folder: self.folder,
            search: self.search.unwrap_or_default(),
            sort,
        })
    }
}

/// Query parameters for `GET /api/stats/activity`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityQuery {
    pub year: Option<i32>,
}
