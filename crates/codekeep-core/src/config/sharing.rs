//! Public share link configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Shortest accepted share token. Twelve `[0-9a-z]` characters carry about 62 bits.
pub const MIN_TOKEN_LENGTH: usize = 12;

/// Settings for anonymous share links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharingConfig {
    /// Number of characters in a generated share token.
    #[serde(default = "default_token_length")]
    pub token_length: usize,
    /// Base URL that share tokens are appended to when building links.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

impl SharingConfig {
    /// Reject settings that would make share links guessable.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.token_length < MIN_TOKEN_LENGTH {
            return Err(AppError::configuration(format!(
                "sharing.token_length must be at least {MIN_TOKEN_LENGTH}, got {}",
                self.token_length
            )));
        }
        Ok(())
    }

    /// Build the public URL for a share token.
    pub fn share_url(&self, share_id: &str) -> String {
        format!("{}/{}", self.public_base_url.trim_end_matches('/'), share_id)
    }
}

impl Default for SharingConfig {
    fn default() -> Self {
        Self {
            token_length: default_token_length(),
            public_base_url: default_public_base_url(),
        }
    }
}

fn default_token_length() -> usize {
    MIN_TOKEN_LENGTH
}

fn default_public_base_url() -> String {
    "http://127.0.0.1:8080/s".to_string()
}
