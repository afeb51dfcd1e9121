//! Snippet service: create, update, delete and sharing.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;

use codekeep_core::error::{AppError, ErrorKind};
use codekeep_database::DatabasePool;
use codekeep_database::repositories::{FolderRepository, SnippetRepository, VersionRepository};
use codekeep_entity::snippet::{CreateSnippet, Snippet, UpdateSnippet, normalize_tags};

use crate::context::AccountContext;
use crate::share::TokenSource;
use crate::snippet::browse::{BrowseQuery, BrowseView};

/// How many fresh share tokens are tried before giving up.
pub const MAX_SHARE_TOKEN_ATTEMPTS: usize = 3;

/// Message returned for any share lookup that does not resolve.
const SHARED_NOT_FOUND: &str = "Shared snippet not found";

/// Owns the canonical snippet records.
///
/// Every `update` snapshots the pre-update fields into the version store
/// inside the same unit of work as the write.
#[derive(Debug, Clone)]
pub struct SnippetService {
    /// Database pool used to open units of work.
    db: DatabasePool,
    /// Snippet repository.
    snippet_repo: Arc<SnippetRepository>,
    /// Version repository.
    version_repo: Arc<VersionRepository>,
    /// Folder repository, for validating folder references.
    folder_repo: Arc<FolderRepository>,
    /// Share token source.
    tokens: Arc<dyn TokenSource>,
}

impl SnippetService {
    /// Creates a new snippet service.
    pub fn new(
        db: DatabasePool,
        snippet_repo: Arc<SnippetRepository>,
        version_repo: Arc<VersionRepository>,
        folder_repo: Arc<FolderRepository>,
        tokens: Arc<dyn TokenSource>,
    ) -> Self {
        Self {
            db,
            snippet_repo,
            version_repo,
            folder_repo,
            tokens,
        }
    }

    /// Creates a snippet. No version is recorded.
    pub async fn create(
        &self,
        ctx: &AccountContext,
        data: CreateSnippet,
    ) -> Result<Snippet, AppError> {
        let name = data.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Snippet name is required"));
        }
        if data.code.trim().is_empty() {
            return Err(AppError::validation("Snippet code is required"));
        }
        let language = data.language.trim();
        if language.is_empty() {
            return Err(AppError::validation("Snippet language is required"));
        }
        if let Some(folder_id) = data.folder_id {
            self.require_folder(ctx, folder_id).await?;
        }

        let now = Utc::now();
        let snippet = Snippet {
            id: Uuid::new_v4(),
            account_id: ctx.account_id,
            folder_id: data.folder_id,
            name: name.to_string(),
            description: data.description,
            code: data.code,
            language: language.to_string(),
            tags: normalize_tags(&data.tags),
            is_public: false,
            share_id: None,
            created_at: now,
            updated_at: now,
        };

        let created = self.snippet_repo.create(&snippet).await?;
        info!(
            account_id = %ctx.account_id,
            snippet_id = %created.id,
            language = %created.language,
            "Snippet created"
        );
        Ok(created)
    }

    /// Gets a snippet by ID.
    pub async fn get(&self, ctx: &AccountContext, id: Uuid) -> Result<Snippet, AppError> {
        self.snippet_repo
            .find_by_id(ctx.account_id, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Snippet {id} not found")))
    }

    /// Lists the account's snippets, newest first.
    pub async fn list(&self, ctx: &AccountContext) -> Result<Vec<Snippet>, AppError> {
        self.snippet_repo.find_by_account(ctx.account_id).await
    }

    /// Builds a browse view over the account's snippets.
    pub async fn browse(
        &self,
        ctx: &AccountContext,
        query: &BrowseQuery,
    ) -> Result<BrowseView, AppError> {
        let items = self.list(ctx).await?;
        Ok(BrowseView::from_query(items, query))
    }

    /// Applies `changes` after snapshotting the current fields.
    ///
    /// The snapshot and the write share one unit of work. If either fails
    /// nothing is persisted.
    pub async fn update(
        &self,
        ctx: &AccountContext,
        id: Uuid,
        changes: &UpdateSnippet,
    ) -> Result<Snippet, AppError> {
        changes.validate()?;

        let mut uow = self.db.begin().await?;
        if let Some(folder_id) = changes.target_folder() {
            self.folder_repo
                .find_by_id_in(&mut uow, ctx.account_id, folder_id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))?;
        }
        let mut snippet = self
            .snippet_repo
            .find_by_id_in(&mut uow, ctx.account_id, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Snippet {id} not found")))?;

        let version_id = self
            .version_repo
            .record(&mut uow, snippet.id, &snippet.snapshot())
            .await?;

        changes.apply(&mut snippet)?;
        snippet.updated_at = Utc::now();
        let updated = self.snippet_repo.update_content(&mut uow, &snippet).await?;
        uow.commit().await?;

        info!(
            account_id = %ctx.account_id,
            snippet_id = %id,
            version_id = %version_id,
            "Snippet updated"
        );
        Ok(updated)
    }

    /// Deletes a snippet together with its whole history.
    pub async fn delete(&self, ctx: &AccountContext, id: Uuid) -> Result<(), AppError> {
        match self.delete_cascade(ctx, id).await {
            Ok(versions) => {
                info!(
                    account_id = %ctx.account_id,
                    snippet_id = %id,
                    versions,
                    "Snippet deleted"
                );
                Ok(())
            }
            Err(e) if e.is(ErrorKind::NotFound) => Err(e),
            Err(e) => {
                error!(snippet_id = %id, error = %e, "Failed to delete snippet and its versions");
                Err(e)
            }
        }
    }

    async fn delete_cascade(&self, ctx: &AccountContext, id: Uuid) -> Result<u64, AppError> {
        let mut uow = self.db.begin().await?;
        self.snippet_repo
            .find_by_id_in(&mut uow, ctx.account_id, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Snippet {id} not found")))?;

        let versions = self.version_repo.delete_all_for(&mut uow, id).await?;
        self.snippet_repo.delete(&mut uow, ctx.account_id, id).await?;
        uow.commit().await?;
        Ok(versions)
    }

    /// Turns public sharing on or off.
    ///
    /// The first time a snippet is made public it receives a share token,
    /// which is kept for the snippet's lifetime. No version is recorded.
    pub async fn set_sharing(
        &self,
        ctx: &AccountContext,
        id: Uuid,
        is_public: bool,
    ) -> Result<Snippet, AppError> {
        let current = self.get(ctx, id).await?;

        // The stored token is kept by the repository whenever one exists.
        if !is_public || current.share_id.is_some() {
            let updated = self
                .snippet_repo
                .update_sharing(ctx.account_id, id, is_public, None, Utc::now())
                .await?;
            info!(snippet_id = %id, is_public, "Snippet sharing changed");
            return Ok(updated);
        }

        for attempt in 1..=MAX_SHARE_TOKEN_ATTEMPTS {
            let token = self.tokens.generate();
            match self
                .snippet_repo
                .update_sharing(ctx.account_id, id, true, Some(&token), Utc::now())
                .await
            {
                Ok(updated) => {
                    info!(snippet_id = %id, attempt, "Snippet shared");
                    return Ok(updated);
                }
                Err(e) if e.is(ErrorKind::Conflict) => {
                    warn!(snippet_id = %id, attempt, "Share token collision");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::conflict(format!(
            "Could not allocate a unique share id after {MAX_SHARE_TOKEN_ATTEMPTS} attempts"
        )))
    }

    /// Looks up a public snippet by share token.
    ///
    /// Unknown tokens and private snippets produce the same error.
    pub async fn get_by_share_id(&self, share_id: &str) -> Result<Snippet, AppError> {
        match self.snippet_repo.find_by_share_id(share_id).await? {
            Some(snippet) if snippet.is_public => Ok(snippet),
            _ => Err(AppError::not_found(SHARED_NOT_FOUND)),
        }
    }

    async fn require_folder(&self, ctx: &AccountContext, folder_id: Uuid) -> Result<(), AppError> {
        self.folder_repo
            .find_by_id(ctx.account_id, folder_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))
    }
}
