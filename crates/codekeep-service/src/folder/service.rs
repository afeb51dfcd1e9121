//! Folder service: list, create, rename, delete.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use codekeep_core::error::AppError;
use codekeep_database::DatabasePool;
use codekeep_database::repositories::{FolderRepository, SnippetRepository};
use codekeep_entity::folder::{Folder, clean_folder_name};

use crate::context::AccountContext;

/// Manages an account's folders.
#[derive(Debug, Clone)]
pub struct FolderService {
    /// Database pool used to open units of work.
    db: DatabasePool,
    /// Folder repository.
    folder_repo: Arc<FolderRepository>,
    /// Snippet repository, for detaching snippets on delete.
    snippet_repo: Arc<SnippetRepository>,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(
        db: DatabasePool,
        folder_repo: Arc<FolderRepository>,
        snippet_repo: Arc<SnippetRepository>,
    ) -> Self {
        Self {
            db,
            folder_repo,
            snippet_repo,
        }
    }

    /// Lists folders sorted by name.
    pub async fn list(&self, ctx: &AccountContext) -> Result<Vec<Folder>, AppError> {
        self.folder_repo.find_by_account(ctx.account_id).await
    }

    /// Gets a folder by ID.
    pub async fn get(&self, ctx: &AccountContext, id: Uuid) -> Result<Folder, AppError> {
        self.folder_repo
            .find_by_id(ctx.account_id, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))
    }

    /// Creates a folder with a trimmed, non-empty, unique name.
    pub async fn create(&self, ctx: &AccountContext, name: &str) -> Result<Folder, AppError> {
        let name = clean_folder_name(name)
            .ok_or_else(|| AppError::validation("Folder name cannot be empty"))?;

        let now = Utc::now();
        let folder = Folder {
            id: Uuid::new_v4(),
            account_id: ctx.account_id,
            name,
            created_at: now,
            updated_at: now,
        };
        let created = self.folder_repo.create(&folder).await?;
        info!(account_id = %ctx.account_id, folder_id = %created.id, "Folder created");
        Ok(created)
    }

    /// Renames a folder.
    pub async fn rename(
        &self,
        ctx: &AccountContext,
        id: Uuid,
        name: &str,
    ) -> Result<Folder, AppError> {
        let name = clean_folder_name(name)
            .ok_or_else(|| AppError::validation("Folder name cannot be empty"))?;

        let renamed = self
            .folder_repo
            .rename(ctx.account_id, id, &name, Utc::now())
            .await?;
        info!(account_id = %ctx.account_id, folder_id = %id, "Folder renamed");
        Ok(renamed)
    }

    /// Deletes a folder, moving its snippets back to the top level.
    ///
    /// Detached snippets keep their `updated_at` and gain no versions.
    pub async fn delete(&self, ctx: &AccountContext, id: Uuid) -> Result<(), AppError> {
        let mut uow = self.db.begin().await?;
        let detached = self
            .snippet_repo
            .detach_folder(&mut uow, ctx.account_id, id)
            .await?;
        if !self.folder_repo.delete(&mut uow, ctx.account_id, id).await? {
            return Err(AppError::not_found(format!("Folder {id} not found")));
        }
        uow.commit().await?;

        info!(account_id = %ctx.account_id, folder_id = %id, detached, "Folder deleted");
        Ok(())
    }
}
