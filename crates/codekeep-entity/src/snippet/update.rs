//! Partial updates for snippets.

use std::fmt;

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use uuid::Uuid;

use codekeep_core::{AppError, AppResult};

use super::model::Snippet;
use super::tags::normalize_tags;

/// A per-field change.
///
/// On the wire a missing field is `Unchanged`, an explicit `null` is
/// `Clear`, and any other value is `SetTo`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldUpdate<T> {
    /// Leave the field as it is.
    #[default]
    Unchanged,
    /// Replace the field with the given value.
    SetTo(T),
    /// Reset the field to its empty value.
    Clear,
}

impl<T> FieldUpdate<T> {
    /// Returns `true` if the field is left untouched.
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    /// Build from an optional value: `None` leaves the field unchanged.
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::SetTo(v),
            None => Self::Unchanged,
        }
    }
}

impl<'de, T> Deserialize<'de> for FieldUpdate<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Self::SetTo(value),
            None => Self::Clear,
        })
    }
}

impl<T> Serialize for FieldUpdate<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::SetTo(value) => value.serialize(serializer),
            Self::Unchanged | Self::Clear => serializer.serialize_none(),
        }
    }
}

/// A typed set of changes to apply to a snippet.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UpdateSnippet {
    #[serde(default, skip_serializing_if = "FieldUpdate::is_unchanged")]
    pub name: FieldUpdate<String>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_unchanged")]
    pub description: FieldUpdate<String>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_unchanged")]
    pub code: FieldUpdate<String>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_unchanged")]
    pub language: FieldUpdate<String>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_unchanged")]
    pub tags: FieldUpdate<Vec<String>>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_unchanged")]
    pub folder_id: FieldUpdate<Uuid>,
}

impl UpdateSnippet {
    /// Check that no required field is cleared or blanked.
    pub fn validate(&self) -> AppResult<()> {
        require("name", &self.name)?;
        require("code", &self.code)?;
        require("language", &self.language)?;
        Ok(())
    }

    /// The folder this update moves the snippet into, if any.
    pub fn target_folder(&self) -> Option<Uuid> {
        match self.folder_id {
            FieldUpdate::SetTo(id) => Some(id),
            _ => None,
        }
    }

    /// Apply the changes to `snippet`. Does not touch `updated_at`.
    pub fn apply(&self, snippet: &mut Snippet) -> AppResult<()> {
        self.validate()?;

        if let FieldUpdate::SetTo(name) = &self.name {
            snippet.name = name.trim().to_string();
        }
        if let FieldUpdate::SetTo(code) = &self.code {
            snippet.code = code.clone();
        }
        if let FieldUpdate::SetTo(language) = &self.language {
            snippet.language = language.trim().to_string();
        }
        match &self.description {
            FieldUpdate::SetTo(description) => snippet.description = description.clone(),
            FieldUpdate::Clear => snippet.description.clear(),
            FieldUpdate::Unchanged => {}
        }
        match &self.tags {
            FieldUpdate::SetTo(tags) => snippet.tags = normalize_tags(tags),
            FieldUpdate::Clear => snippet.tags.clear(),
            FieldUpdate::Unchanged => {}
        }
        match self.folder_id {
            FieldUpdate::SetTo(id) => snippet.folder_id = Some(id),
            FieldUpdate::Clear => snippet.folder_id = None,
            FieldUpdate::Unchanged => {}
        }
        Ok(())
    }
}

fn require(field: &str, update: &FieldUpdate<String>) -> AppResult<()> {
    match update {
        FieldUpdate::Clear => Err(AppError::validation(format!("{field} cannot be cleared"))),
        FieldUpdate::SetTo(value) if value.trim().is_empty() => {
            Err(AppError::validation(format!("{field} cannot be empty")))
        }
        _ => Ok(()),
    }
}

impl<T: fmt::Display> fmt::Display for FieldUpdate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unchanged => write!(f, "(unchanged)"),
            Self::SetTo(v) => write!(f, "{v}"),
            Self::Clear => write!(f, "(cleared)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use codekeep_core::error::ErrorKind;

    fn sample() -> Snippet {
        let now = Utc::now();
        Snippet {
            id: Uuid::new_v4(),
            account_id: Uuid::new_v4(),
            folder_id: Some(Uuid::new_v4()),
            name: "foo".to_string(),
            description: "desc".to_string(),
            code: "a".to_string(),
            language: "rust".to_string(),
            tags: vec!["x".to_string()],
            is_public: false,
            share_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_deserialize_missing_null_and_value() {
        let update: UpdateSnippet =
            serde_json::from_str(r#"{"code":"b","description":null}"#).unwrap();
        assert_eq!(update.code, FieldUpdate::SetTo("b".to_string()));
        assert_eq!(update.description, FieldUpdate::Clear);
        assert_eq!(update.name, FieldUpdate::Unchanged);
        assert_eq!(update.folder_id, FieldUpdate::Unchanged);
    }

    #[test]
    fn test_serialize_skips_unchanged() {
        let update = UpdateSnippet {
            code: FieldUpdate::SetTo("b".to_string()),
            tags: FieldUpdate::Clear,
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"code": "b", "tags": null}));
    }

    #[test]
    fn test_apply_clear_semantics() {
        let mut s = sample();
        let update = UpdateSnippet {
            description: FieldUpdate::Clear,
            tags: FieldUpdate::Clear,
            folder_id: FieldUpdate::Clear,
            ..Default::default()
        };
        update.apply(&mut s).unwrap();
        assert_eq!(s.description, "");
        assert!(s.tags.is_empty());
        assert!(s.folder_id.is_none());
        assert_eq!(s.name, "foo");
    }

    #[test]
    fn test_clear_required_field_rejected() {
        for update in [
            UpdateSnippet { name: FieldUpdate::Clear, ..Default::default() },
            UpdateSnippet { code: FieldUpdate::Clear, ..Default::default() },
            UpdateSnippet { language: FieldUpdate::SetTo("  ".into()), ..Default::default() },
        ] {
            let mut s = sample();
            let err = update.apply(&mut s).unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation);
            assert_eq!(s.code, "a");
        }
    }

    #[test]
    fn test_apply_normalizes_tags() {
        let mut s = sample();
        let update = UpdateSnippet {
            tags: FieldUpdate::SetTo(vec![" a".into(), "a".into(), "".into(), "b".into()]),
            ..Default::default()
        };
        update.apply(&mut s).unwrap();
        assert_eq!(s.tags, vec!["a", "b"]);
    }
}
