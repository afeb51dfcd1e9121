//! Version store: append-only snippet history.

use chrono::Utc;
use sqlx::SqlitePool;
use sqlx::types::Json;
use uuid::Uuid;

use codekeep_core::error::{AppError, ErrorKind};
use codekeep_core::result::AppResult;
use codekeep_entity::version::{SnippetSnapshot, SnippetVersion};

use crate::uow::UnitOfWork;

/// Repository for snippet versions.
///
/// Rows are only ever inserted or removed in bulk alongside their snippet.
#[derive(Debug, Clone)]
pub struct VersionRepository {
    pool: SqlitePool,
}

impl VersionRepository {
    /// Create a new version repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Append a snapshot for `snippet_id` and return the new version id.
    pub async fn record(
        &self,
        uow: &mut UnitOfWork,
        snippet_id: Uuid,
        snapshot: &SnippetSnapshot,
    ) -> AppResult<Uuid> {
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO snippet_versions \
             (id, snippet_id, name, description, code, language, tags, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .bind(id)
        .bind(snippet_id)
        .bind(&snapshot.name)
        .bind(&snapshot.description)
        .bind(&snapshot.code)
        .bind(&snapshot.language)
        .bind(Json(&snapshot.tags))
        .bind(Utc::now())
        .execute(uow.conn())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record version", e))?;
        Ok(id)
    }

    /// All versions of a snippet, newest first.
    pub async fn list_for(&self, snippet_id: Uuid) -> AppResult<Vec<SnippetVersion>> {
        sqlx::query_as::<_, SnippetVersion>(
            "SELECT * FROM snippet_versions WHERE snippet_id = ?1 \
             ORDER BY created_at DESC, seq DESC",
        )
        .bind(snippet_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list versions", e))
    }

    /// Fetch a single version.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<SnippetVersion>> {
        sqlx::query_as::<_, SnippetVersion>("SELECT * FROM snippet_versions WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find version", e))
    }

    /// Count the versions of a snippet.
    pub async fn count_for(&self, snippet_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM snippet_versions WHERE snippet_id = ?1")
            .bind(snippet_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count versions", e))
    }

    /// Remove every version of a snippet.
    pub async fn delete_all_for(&self, uow: &mut UnitOfWork, snippet_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM snippet_versions WHERE snippet_id = ?1")
            .bind(snippet_id)
            .execute(uow.conn())
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete versions", e))?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::test_support::{migrated_pool, seed_account, seed_snippet};

    fn snap(code: &str) -> SnippetSnapshot {
        SnippetSnapshot {
            name: "foo".to_string(),
            description: String::new(),
            code: code.to_string(),
            language: "rust".to_string(),
            tags: vec!["t".to_string()],
        }
    }

    #[tokio::test]
    async fn test_list_for_is_newest_first() {
        let db = migrated_pool().await;
        let account = seed_account(&db, "default").await;
        let snippet = seed_snippet(&db, account.id, "foo").await;
        let repo = VersionRepository::new(db.pool().clone());

        let mut uow = db.begin().await.unwrap();
        for code in ["a", "b", "c"] {
            repo.record(&mut uow, snippet.id, &snap(code)).await.unwrap();
        }
        uow.commit().await.unwrap();

        let codes: Vec<String> = repo
            .list_for(snippet.id)
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.code)
            .collect();
        assert_eq!(codes, vec!["c", "b", "a"]);
    }

    #[tokio::test]
    async fn test_list_for_unknown_is_empty() {
        let db = migrated_pool().await;
        let repo = VersionRepository::new(db.pool().clone());
        assert!(repo.list_for(Uuid::new_v4()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_uncommitted_record_is_discarded() {
        let db = migrated_pool().await;
        let account = seed_account(&db, "default").await;
        let snippet = seed_snippet(&db, account.id, "foo").await;
        let repo = VersionRepository::new(db.pool().clone());

        let id = {
            let mut uow = db.begin().await.unwrap();
            repo.record(&mut uow, snippet.id, &snap("a")).await.unwrap()
        };
        assert!(repo.find_by_id(id).await.unwrap().is_none());
        assert_eq!(repo.count_for(snippet.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_all_for() {
        let db = migrated_pool().await;
        let account = seed_account(&db, "default").await;
        let snippet = seed_snippet(&db, account.id, "foo").await;
        let repo = VersionRepository::new(db.pool().clone());

        let mut uow = db.begin().await.unwrap();
        repo.record(&mut uow, snippet.id, &snap("a")).await.unwrap();
        repo.record(&mut uow, snippet.id, &snap("b")).await.unwrap();
        assert_eq!(repo.delete_all_for(&mut uow, snippet.id).await.unwrap(), 2);
        uow.commit().await.unwrap();

        assert!(repo.list_for(snippet.id).await.unwrap().is_empty());
    }
}
