//! Account entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Username of the implicit account used when no other account exists.
pub const DEFAULT_USERNAME: &str = "default";

/// Prefix carried by every issued API key.
pub const API_KEY_PREFIX: &str = "ck_live_";

/// An account owning snippets and holding the API key for the read API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Account {
    /// Unique account identifier.
    pub id: Uuid,
    /// Unique login name.
    pub username: String,
    /// Bearer key for the HTTP API. Matched exactly.
    #[serde(skip_serializing)]
    pub api_key: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Generate a fresh API key: `ck_live_` followed by 32 hex characters.
pub fn generate_api_key() -> String {
    format!("{API_KEY_PREFIX}{}", Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_api_key_shape() {
        let key = generate_api_key();
        assert!(key.starts_with(API_KEY_PREFIX));
        let suffix = &key[API_KEY_PREFIX.len()..];
        assert_eq!(suffix.len(), 32);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generate_api_key_unique() {
        assert_ne!(generate_api_key(), generate_api_key());
    }

    #[test]
    fn test_api_key_not_serialized() {
        let account = Account {
            id: Uuid::new_v4(),
            username: DEFAULT_USERNAME.to_string(),
            api_key: generate_api_key(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&account).unwrap();
        assert!(json.get("api_key").is_none());
        assert_eq!(json["username"], "default");
    }
}
