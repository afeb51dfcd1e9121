//! Folder repository implementation.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use codekeep_core::error::{AppError, ErrorKind, is_unique_violation};
use codekeep_core::result::AppResult;
use codekeep_entity::folder::Folder;

use crate::uow::UnitOfWork;

/// Repository for folder CRUD.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: SqlitePool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a folder by ID within an account.
    pub async fn find_by_id(&self, account_id: Uuid, id: Uuid) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = ?1 AND account_id = ?2")
            .bind(id)
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    /// Find a folder by ID inside a unit of work.
    pub async fn find_by_id_in(
        &self,
        uow: &mut UnitOfWork,
        account_id: Uuid,
        id: Uuid,
    ) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = ?1 AND account_id = ?2")
            .bind(id)
            .bind(account_id)
            .fetch_optional(uow.conn())
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    /// List an account's folders by name.
    pub async fn find_by_account(&self, account_id: Uuid) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders WHERE account_id = ?1 ORDER BY name COLLATE NOCASE ASC, id ASC",
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list folders", e))
    }

    /// Create a new folder.
    pub async fn create(&self, folder: &Folder) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "INSERT INTO folders (id, account_id, name, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5) RETURNING *",
        )
        .bind(folder.id)
        .bind(folder.account_id)
        .bind(&folder.name)
        .bind(folder.created_at)
        .bind(folder.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict(format!("Folder '{}' already exists", folder.name))
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to create folder", e)
            }
        })
    }

    /// Rename a folder.
    pub async fn rename(
        &self,
        account_id: Uuid,
        id: Uuid,
        name: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "UPDATE folders SET name = ?3, updated_at = ?4 \
             WHERE id = ?1 AND account_id = ?2 RETURNING *",
        )
        .bind(id)
        .bind(account_id)
        .bind(name)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict(format!("Folder '{name}' already exists"))
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to rename folder", e)
            }
        })?
        .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))
    }

    /// Delete a folder inside a unit of work.
    pub async fn delete(&self, uow: &mut UnitOfWork, account_id: Uuid, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM folders WHERE id = ?1 AND account_id = ?2")
            .bind(id)
            .bind(account_id)
            .execute(uow.conn())
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete folder", e))?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::test_support::{migrated_pool, seed_account};

    fn folder(account_id: Uuid, name: &str) -> Folder {
        let now = Utc::now();
        Folder {
            id: Uuid::new_v4(),
            account_id,
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_and_list_sorted() {
        let db = migrated_pool().await;
        let account = seed_account(&db, "default").await;
        let repo = FolderRepository::new(db.pool().clone());

        repo.create(&folder(account.id, "Zeta")).await.unwrap();
        repo.create(&folder(account.id, "Alpha")).await.unwrap();

        let names: Vec<String> = repo
            .find_by_account(account.id)
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, vec!["Alpha", "Zeta"]);
    }

    #[tokio::test]
    async fn test_duplicate_name_is_conflict() {
        let db = migrated_pool().await;
        let account = seed_account(&db, "default").await;
        let repo = FolderRepository::new(db.pool().clone());

        repo.create(&folder(account.id, "Utils")).await.unwrap();
        let err = repo.create(&folder(account.id, "Utils")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        let other = seed_account(&db, "other").await;
        repo.create(&folder(other.id, "Utils")).await.unwrap();
    }

    #[tokio::test]
    async fn test_rename_unknown_is_not_found() {
        let db = migrated_pool().await;
        let account = seed_account(&db, "default").await;
        let repo = FolderRepository::new(db.pool().clone());

        let err = repo
            .rename(account.id, Uuid::new_v4(), "x", Utc::now())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_delete_rolls_back_without_commit() {
        let db = migrated_pool().await;
        let account = seed_account(&db, "default").await;
        let repo = FolderRepository::new(db.pool().clone());
        let created = repo.create(&folder(account.id, "Temp")).await.unwrap();

        {
            let mut uow = db.begin().await.unwrap();
            assert!(repo.delete(&mut uow, account.id, created.id).await.unwrap());
        }
        assert!(repo.find_by_id(account.id, created.id).await.unwrap().is_some());

        let mut uow = db.begin().await.unwrap();
        assert!(repo.delete(&mut uow, account.id, created.id).await.unwrap());
        uow.commit().await.unwrap();
        assert!(repo.find_by_id(account.id, created.id).await.unwrap().is_none());
    }
}
