//! Version history reads.

use std::sync::Arc;

use uuid::Uuid;

use codekeep_core::error::AppError;
use codekeep_database::repositories::{SnippetRepository, VersionRepository};
use codekeep_entity::version::SnippetVersion;

use crate::context::AccountContext;

/// Read access to snippet version history, scoped to the owning account.
#[derive(Debug, Clone)]
pub struct VersionService {
    /// Snippet repository, for ownership checks.
    snippet_repo: Arc<SnippetRepository>,
    /// Version repository.
    version_repo: Arc<VersionRepository>,
}

impl VersionService {
    /// Creates a new version service.
    pub fn new(snippet_repo: Arc<SnippetRepository>, version_repo: Arc<VersionRepository>) -> Self {
        Self {
            snippet_repo,
            version_repo,
        }
    }

    /// Lists a snippet's versions, newest first.
    pub async fn list_for(
        &self,
        ctx: &AccountContext,
        snippet_id: Uuid,
    ) -> Result<Vec<SnippetVersion>, AppError> {
        self.snippet_repo
            .find_by_id(ctx.account_id, snippet_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Snippet {snippet_id} not found")))?;

        self.version_repo.list_for(snippet_id).await
    }

    /// Gets a single version whose snippet belongs to the account.
    pub async fn get(
        &self,
        ctx: &AccountContext,
        version_id: Uuid,
    ) -> Result<SnippetVersion, AppError> {
        let version = self
            .version_repo
            .find_by_id(version_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Version {version_id} not found")))?;

        self.snippet_repo
            .find_by_id(ctx.account_id, version.snippet_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Version {version_id} not found")))?;

        Ok(version)
    }
}
