//! Account context threaded through every service call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use codekeep_entity::account::Account;

/// Identifies the account a request acts on behalf of.
///
/// Built by the API key extractor or by the CLI from the default account
/// and passed into service methods so that every query is scoped to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountContext {
    /// The acting account's ID.
    pub account_id: Uuid,
    /// The acting account's username.
    pub username: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl AccountContext {
    /// Creates a context for the given account.
    pub fn new(account_id: Uuid, username: impl Into<String>) -> Self {
        Self {
            account_id,
            username: username.into(),
            request_time: Utc::now(),
        }
    }
}

impl From<&Account> for AccountContext {
    fn from(account: &Account) -> Self {
        Self::new(account.id, account.username.clone())
    }
}
