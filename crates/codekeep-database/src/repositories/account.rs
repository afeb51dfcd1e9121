//! Account repository implementation.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use codekeep_core::error::{AppError, ErrorKind, is_unique_violation};
use codekeep_core::result::AppResult;
use codekeep_entity::account::Account;

/// Repository for account lookups and API key management.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    pool: SqlitePool,
}

impl AccountRepository {
    /// Create a new account repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find an account by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find account", e))
    }

    /// Find an account by username.
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE username = ?1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find account by username", e)
            })
    }

    /// Find an account by exact API key match.
    pub async fn find_by_api_key(&self, api_key: &str) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE api_key = ?1")
            .bind(api_key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find account by API key", e)
            })
    }

    /// Insert the account unless one with the same username exists, then
    /// return whichever row is stored.
    pub async fn insert_if_absent(&self, account: &Account) -> AppResult<Account> {
        sqlx::query(
            "INSERT INTO accounts (id, username, api_key, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5) ON CONFLICT (username) DO NOTHING",
        )
        .bind(account.id)
        .bind(&account.username)
        .bind(&account.api_key)
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create account", e))?;

        self.find_by_username(&account.username)
            .await?
            .ok_or_else(|| AppError::internal(format!("Account '{}' vanished", account.username)))
    }

    /// Replace the API key of an account.
    pub async fn update_api_key(
        &self,
        id: Uuid,
        api_key: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Account> {
        sqlx::query_as::<_, Account>(
            "UPDATE accounts SET api_key = ?2, updated_at = ?3 WHERE id = ?1 RETURNING *",
        )
        .bind(id)
        .bind(api_key)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict("API key already in use")
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to update API key", e)
            }
        })?
        .ok_or_else(|| AppError::not_found(format!("Account {id} not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::test_support::{migrated_pool, seed_account};

    #[tokio::test]
    async fn test_insert_if_absent_keeps_first_row() {
        let db = migrated_pool().await;
        let first = seed_account(&db, "default").await;
        let second = seed_account(&db, "default").await;
        assert_eq!(first.id, second.id);
        assert_eq!(first.api_key, second.api_key);
    }

    #[tokio::test]
    async fn test_find_by_api_key_exact_match() {
        let db = migrated_pool().await;
        let account = seed_account(&db, "default").await;
        let repo = AccountRepository::new(db.pool().clone());

        let found = repo.find_by_api_key(&account.api_key).await.unwrap();
        assert_eq!(found.map(|a| a.id), Some(account.id));

        let prefix = &account.api_key[..10];
        assert!(repo.find_by_api_key(prefix).await.unwrap().is_none());
        assert!(repo.find_by_api_key("").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_api_key() {
        let db = migrated_pool().await;
        let account = seed_account(&db, "default").await;
        let repo = AccountRepository::new(db.pool().clone());

        let updated = repo
            .update_api_key(account.id, "ck_live_new", Utc::now())
            .await
            .unwrap();
        assert_eq!(updated.api_key, "ck_live_new");
        assert!(repo.find_by_api_key(&account.api_key).await.unwrap().is_none());
    }
}
