//! Anonymous access to shared snippets.

use std::sync::Arc;

use codekeep_core::error::AppError;
use codekeep_entity::snippet::PublicSnippet;

use crate::snippet::SnippetService;

/// Resolves share tokens for visitors without an account.
///
/// No listing operation exists on this path.
#[derive(Debug, Clone)]
pub struct AccessService {
    /// Snippet service owning the share lookup.
    snippets: Arc<SnippetService>,
}

impl AccessService {
    /// Creates a new access service.
    pub fn new(snippets: Arc<SnippetService>) -> Self {
        Self { snippets }
    }

    /// Returns the public view of a shared snippet.
    ///
    /// Unknown tokens and tokens of private snippets fail identically.
    pub async fn resolve_public(&self, share_id: &str) -> Result<PublicSnippet, AppError> {
        let snippet = self.snippets.get_by_share_id(share_id).await?;
        Ok(snippet.public_view())
    }
}
