//! Account service: the default account and its API key.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use codekeep_core::error::AppError;
use codekeep_database::repositories::AccountRepository;
use codekeep_entity::account::{Account, DEFAULT_USERNAME, generate_api_key};

use crate::context::AccountContext;

/// Manages accounts and API key authentication.
#[derive(Debug, Clone)]
pub struct AccountService {
    /// Account repository.
    account_repo: Arc<AccountRepository>,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(account_repo: Arc<AccountRepository>) -> Self {
        Self { account_repo }
    }

    /// Returns the default account, creating it on first use.
    pub async fn default_account(&self) -> Result<Account, AppError> {
        if let Some(account) = self.account_repo.find_by_username(DEFAULT_USERNAME).await? {
            return Ok(account);
        }

        let now = Utc::now();
        let account = Account {
            id: Uuid::new_v4(),
            username: DEFAULT_USERNAME.to_string(),
            api_key: generate_api_key(),
            created_at: now,
            updated_at: now,
        };
        let stored = self.account_repo.insert_if_absent(&account).await?;
        if stored.id == account.id {
            info!(account_id = %stored.id, "Created default account");
        }
        Ok(stored)
    }

    /// Returns the account a context refers to.
    pub async fn current(&self, ctx: &AccountContext) -> Result<Account, AppError> {
        self.account_repo
            .find_by_id(ctx.account_id)
            .await?
            .ok_or_else(|| AppError::not_found("Account not found"))
    }

    /// Resolves an API key to its account by exact match.
    pub async fn authenticate(&self, api_key: &str) -> Result<Account, AppError> {
        if api_key.is_empty() {
            warn!("Rejected empty API key");
            return Err(AppError::authentication("Invalid API key"));
        }

        match self.account_repo.find_by_api_key(api_key).await? {
            Some(account) => Ok(account),
            None => {
                warn!("Rejected unknown API key");
                Err(AppError::authentication("Invalid API key"))
            }
        }
    }

    /// Issues a new API key, invalidating the old one.
    pub async fn rotate_api_key(&self, ctx: &AccountContext) -> Result<Account, AppError> {
        let account = self
            .account_repo
            .update_api_key(ctx.account_id, &generate_api_key(), Utc::now())
            .await?;
        info!(account_id = %account.id, "Rotated API key");
        Ok(account)
    }
}
