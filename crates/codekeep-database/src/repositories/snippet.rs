//! Snippet repository implementation.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use sqlx::types::Json;
use uuid::Uuid;

use codekeep_core::error::{AppError, ErrorKind, is_foreign_key_violation, is_unique_violation};
use codekeep_core::result::AppResult;
use codekeep_entity::snippet::Snippet;

use crate::uow::UnitOfWork;

/// Repository for the canonical snippet records.
#[derive(Debug, Clone)]
pub struct SnippetRepository {
    pool: SqlitePool,
}

impl SnippetRepository {
    /// Create a new snippet repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a snippet by ID within an account.
    pub async fn find_by_id(&self, account_id: Uuid, id: Uuid) -> AppResult<Option<Snippet>> {
        sqlx::query_as::<_, Snippet>("SELECT * FROM snippets WHERE id = ?1 AND account_id = ?2")
            .bind(id)
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find snippet", e))
    }

    /// Find a snippet by ID inside a unit of work.
    pub async fn find_by_id_in(
        &self,
        uow: &mut UnitOfWork,
        account_id: Uuid,
        id: Uuid,
    ) -> AppResult<Option<Snippet>> {
        sqlx::query_as::<_, Snippet>("SELECT * FROM snippets WHERE id = ?1 AND account_id = ?2")
            .bind(id)
            .bind(account_id)
            .fetch_optional(uow.conn())
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find snippet", e))
    }

    /// Find a snippet by its share token, regardless of its public flag.
    pub async fn find_by_share_id(&self, share_id: &str) -> AppResult<Option<Snippet>> {
        sqlx::query_as::<_, Snippet>("SELECT * FROM snippets WHERE share_id = ?1")
            .bind(share_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find snippet by share id", e)
            })
    }

    /// List an account's snippets, newest first.
    pub async fn find_by_account(&self, account_id: Uuid) -> AppResult<Vec<Snippet>> {
        sqlx::query_as::<_, Snippet>(
            "SELECT * FROM snippets WHERE account_id = ?1 ORDER BY created_at DESC, rowid DESC",
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list snippets", e))
    }

    /// Count an account's snippets.
    pub async fn count_by_account(&self, account_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM snippets WHERE account_id = ?1")
            .bind(account_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count snippets", e))
    }

    /// Insert a new snippet.
    pub async fn create(&self, snippet: &Snippet) -> AppResult<Snippet> {
        sqlx::query_as::<_, Snippet>(
            "INSERT INTO snippets \
             (id, account_id, folder_id, name, description, code, language, tags, \
              is_public, share_id, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12) RETURNING *",
        )
        .bind(snippet.id)
        .bind(snippet.account_id)
        .bind(snippet.folder_id)
        .bind(&snippet.name)
        .bind(&snippet.description)
        .bind(&snippet.code)
        .bind(&snippet.language)
        .bind(Json(&snippet.tags))
        .bind(snippet.is_public)
        .bind(&snippet.share_id)
        .bind(snippet.created_at)
        .bind(snippet.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create snippet", e))
    }

    /// Persist the editable fields, folder and `updated_at` of a snippet.
    ///
    /// A `folder_id` that no longer exists surfaces as `NotFound`.
    pub async fn update_content(
        &self,
        uow: &mut UnitOfWork,
        snippet: &Snippet,
    ) -> AppResult<Snippet> {
        sqlx::query_as::<_, Snippet>(
            "UPDATE snippets SET folder_id = ?3, name = ?4, description = ?5, code = ?6, \
             language = ?7, tags = ?8, updated_at = ?9 \
             WHERE id = ?1 AND account_id = ?2 RETURNING *",
        )
        .bind(snippet.id)
        .bind(snippet.account_id)
        .bind(snippet.folder_id)
        .bind(&snippet.name)
        .bind(&snippet.description)
        .bind(&snippet.code)
        .bind(&snippet.language)
        .bind(Json(&snippet.tags))
        .bind(snippet.updated_at)
        .fetch_optional(uow.conn())
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                AppError::not_found("Folder not found")
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to update snippet", e)
            }
        })?
        .ok_or_else(|| AppError::not_found(format!("Snippet {} not found", snippet.id)))
    }

    /// Set the public flag, assigning `share_id` only if none is stored yet.
    ///
    /// An existing token always wins over the one passed in, so concurrent
    /// callers converge on the stored row. A colliding share token surfaces
    /// as a `Conflict` so the caller can retry with a fresh one.
    pub async fn update_sharing(
        &self,
        account_id: Uuid,
        id: Uuid,
        is_public: bool,
        share_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> AppResult<Snippet> {
        sqlx::query_as::<_, Snippet>(
            "UPDATE snippets SET is_public = ?3, share_id = COALESCE(share_id, ?4), \
             updated_at = ?5 \
             WHERE id = ?1 AND account_id = ?2 RETURNING *",
        )
        .bind(id)
        .bind(account_id)
        .bind(is_public)
        .bind(share_id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict("Share id already in use")
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to update sharing", e)
            }
        })?
        .ok_or_else(|| AppError::not_found(format!("Snippet {id} not found")))
    }

    /// Delete a snippet inside a unit of work.
    pub async fn delete(&self, uow: &mut UnitOfWork, account_id: Uuid, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM snippets WHERE id = ?1 AND account_id = ?2")
            .bind(id)
            .bind(account_id)
            .execute(uow.conn())
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete snippet", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Detach every snippet from a folder. Does not touch `updated_at`.
    pub async fn detach_folder(
        &self,
        uow: &mut UnitOfWork,
        account_id: Uuid,
        folder_id: Uuid,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE snippets SET folder_id = NULL WHERE folder_id = ?1 AND account_id = ?2",
        )
        .bind(folder_id)
        .bind(account_id)
        .execute(uow.conn())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to detach folder", e))?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::test_support::{migrated_pool, seed_account, seed_snippet};

    #[tokio::test]
    async fn test_create_roundtrips_tags_and_flags() {
        let db = migrated_pool().await;
        let account = seed_account(&db, "default").await;
        let created = seed_snippet(&db, account.id, "foo").await;
        let repo = SnippetRepository::new(db.pool().clone());

        let loaded = repo.find_by_id(account.id, created.id).await.unwrap().unwrap();
        assert_eq!(loaded.tags, vec!["demo"]);
        assert!(!loaded.is_public);
        assert!(loaded.share_id.is_none());
        assert_eq!(loaded.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_scoped_to_account() {
        let db = migrated_pool().await;
        let owner = seed_account(&db, "default").await;
        let stranger = seed_account(&db, "stranger").await;
        let created = seed_snippet(&db, owner.id, "foo").await;
        let repo = SnippetRepository::new(db.pool().clone());

        assert!(repo.find_by_id(stranger.id, created.id).await.unwrap().is_none());
        assert!(repo.find_by_account(stranger.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let db = migrated_pool().await;
        let account = seed_account(&db, "default").await;
        seed_snippet(&db, account.id, "first").await;
        seed_snippet(&db, account.id, "second").await;
        let repo = SnippetRepository::new(db.pool().clone());

        let names: Vec<String> = repo
            .find_by_account(account.id)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["second", "first"]);
        assert_eq!(repo.count_by_account(account.id).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_share_id_is_conflict() {
        let db = migrated_pool().await;
        let account = seed_account(&db, "default").await;
        let a = seed_snippet(&db, account.id, "a").await;
        let b = seed_snippet(&db, account.id, "b").await;
        let repo = SnippetRepository::new(db.pool().clone());

        repo.update_sharing(account.id, a.id, true, Some("token"), Utc::now())
            .await
            .unwrap();
        let err = repo
            .update_sharing(account.id, b.id, true, Some("token"), Utc::now())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_stored_share_id_is_never_replaced() {
        let db = migrated_pool().await;
        let account = seed_account(&db, "default").await;
        let a = seed_snippet(&db, account.id, "a").await;
        let repo = SnippetRepository::new(db.pool().clone());

        repo.update_sharing(account.id, a.id, true, Some("first"), Utc::now())
            .await
            .unwrap();
        let again = repo
            .update_sharing(account.id, a.id, true, Some("second"), Utc::now())
            .await
            .unwrap();
        assert_eq!(again.share_id.as_deref(), Some("first"));

        let private = repo
            .update_sharing(account.id, a.id, false, None, Utc::now())
            .await
            .unwrap();
        assert!(!private.is_public);
        assert_eq!(private.share_id.as_deref(), Some("first"));
    }

    #[tokio::test]
    async fn test_update_into_missing_folder_is_not_found() {
        let db = migrated_pool().await;
        let account = seed_account(&db, "default").await;
        let mut snippet = seed_snippet(&db, account.id, "a").await;
        let repo = SnippetRepository::new(db.pool().clone());

        snippet.folder_id = Some(Uuid::new_v4());
        let mut uow = db.begin().await.unwrap();
        let err = repo.update_content(&mut uow, &snippet).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_public_without_share_id_rejected_by_schema() {
        let db = migrated_pool().await;
        let account = seed_account(&db, "default").await;
        let a = seed_snippet(&db, account.id, "a").await;
        let repo = SnippetRepository::new(db.pool().clone());

        let err = repo
            .update_sharing(account.id, a.id, true, None, Utc::now())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Database);
    }
}
