//! Restore orchestrator: snapshot the current state, then overwrite it
//! with a stored version.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use codekeep_core::error::AppError;
use codekeep_database::DatabasePool;
use codekeep_database::repositories::{SnippetRepository, VersionRepository};
use codekeep_entity::snippet::Snippet;

use crate::context::AccountContext;

/// Restores snippets to earlier versions.
///
/// A restore is itself undoable: the pre-restore state is recorded as a
/// new version before the overwrite, inside the same unit of work.
#[derive(Debug, Clone)]
pub struct RestoreService {
    /// Database pool used to open units of work.
    db: DatabasePool,
    /// Snippet repository.
    snippet_repo: Arc<SnippetRepository>,
    /// Version repository.
    version_repo: Arc<VersionRepository>,
}

impl RestoreService {
    /// Creates a new restore service.
    pub fn new(
        db: DatabasePool,
        snippet_repo: Arc<SnippetRepository>,
        version_repo: Arc<VersionRepository>,
    ) -> Self {
        Self {
            db,
            snippet_repo,
            version_repo,
        }
    }

    /// Restores the snippet a version belongs to.
    ///
    /// Sharing state, folder, id and `created_at` are left untouched.
    /// Restoring to a version identical to the live state still records a
    /// version.
    pub async fn restore(
        &self,
        ctx: &AccountContext,
        version_id: Uuid,
    ) -> Result<Snippet, AppError> {
        let version = self
            .version_repo
            .find_by_id(version_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Version {version_id} not found")))?;

        let mut uow = self.db.begin().await?;
        let mut snippet = self
            .snippet_repo
            .find_by_id_in(&mut uow, ctx.account_id, version.snippet_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "Snippet {} for version {version_id} not found",
                    version.snippet_id
                ))
            })?;

        let pre_restore_id = self
            .version_repo
            .record(&mut uow, snippet.id, &snippet.snapshot())
            .await?;

        snippet.apply_snapshot(&version.snapshot());
        snippet.updated_at = Utc::now();
        let restored = self.snippet_repo.update_content(&mut uow, &snippet).await?;
        uow.commit().await?;

        info!(
            account_id = %ctx.account_id,
            snippet_id = %restored.id,
            version_id = %version_id,
            pre_restore_version_id = %pre_restore_id,
            "Snippet restored"
        );
        Ok(restored)
    }
}
