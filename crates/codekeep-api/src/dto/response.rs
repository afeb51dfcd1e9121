//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use codekeep_core::config::SharingConfig;
use codekeep_entity::snippet::Snippet;
use codekeep_service::BrowseState;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}

/// Browse listing: the visible snippets plus the state that produced them.
#[derive(Debug, Clone, Serialize)]
pub struct SnippetListResponse {
    pub items: Vec<Snippet>,
    pub total: usize,
    pub state: BrowseState,
}

/// Sharing state after a toggle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharingResponse {
    pub id: Uuid,
    pub is_public: bool,
    pub share_id: Option<String>,
    /// Present only while the snippet is public.
    pub share_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl SharingResponse {
    /// Builds the response, attaching a link while the snippet is public.
    pub fn new(snippet: &Snippet, sharing: &SharingConfig) -> Self {
        let share_url = snippet
            .share_id
            .as_deref()
            .filter(|_| snippet.is_public)
            .map(|id| sharing.share_url(id));
        Self {
            id: snippet.id,
            is_public: snippet.is_public,
            share_id: snippet.share_id.clone(),
            share_url,
            updated_at: snippet.updated_at,
        }
    }
}

/// Account summary including the API key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: Uuid,
    pub username: String,
    pub api_key: String,
    pub created_at: DateTime<Utc>,
}
