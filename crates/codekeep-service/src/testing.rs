//! Shared fixtures for the service tests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use codekeep_core::error::AppError;
use codekeep_core::result::AppResult;
use codekeep_core::traits::{Assistant, BugReport, ImageTheme, SnippetDetails};
use codekeep_database::DatabasePool;
use codekeep_database::migration::run_migrations;
use codekeep_database::repositories::{
    AccountRepository, FolderRepository, SnippetRepository, VersionRepository,
};
use codekeep_entity::snippet::{CreateSnippet, FieldUpdate, Snippet, UpdateSnippet};

use crate::share::{ShareTokenGenerator, TokenSource};
use crate::{
    AccessService, AccountContext, AccountService, FolderService, RestoreService, SnippetService,
    StatsService, VersionService,
};

/// Always hands out the same token.
#[derive(Debug)]
pub struct FixedTokens(String);

impl FixedTokens {
    pub fn new(token: &str) -> Self {
        Self(token.to_string())
    }
}

impl TokenSource for FixedTokens {
    fn generate(&self) -> String {
        self.0.clone()
    }
}

/// Every service wired over one in-memory database.
pub struct TestServices {
    pub db: DatabasePool,
    pub version_repo: Arc<VersionRepository>,
    pub accounts: AccountService,
    pub snippets: Arc<SnippetService>,
    pub versions: VersionService,
    pub restore: RestoreService,
    pub access: AccessService,
    pub folders: FolderService,
    pub stats: StatsService,
}

impl TestServices {
    pub async fn new() -> Self {
        Self::with_tokens(Arc::new(ShareTokenGenerator::default())).await
    }

    pub async fn with_tokens(tokens: Arc<dyn TokenSource>) -> Self {
        let db = DatabasePool::in_memory().await.unwrap();
        run_migrations(db.pool()).await.unwrap();

        let account_repo = Arc::new(AccountRepository::new(db.pool().clone()));
        let snippet_repo = Arc::new(SnippetRepository::new(db.pool().clone()));
        let version_repo = Arc::new(VersionRepository::new(db.pool().clone()));
        let folder_repo = Arc::new(FolderRepository::new(db.pool().clone()));

        let snippets = Arc::new(SnippetService::new(
            db.clone(),
            snippet_repo.clone(),
            version_repo.clone(),
            folder_repo.clone(),
            tokens,
        ));

        Self {
            accounts: AccountService::new(account_repo),
            versions: VersionService::new(snippet_repo.clone(), version_repo.clone()),
            restore: RestoreService::new(db.clone(), snippet_repo.clone(), version_repo.clone()),
            access: AccessService::new(snippets.clone()),
            folders: FolderService::new(db.clone(), folder_repo, snippet_repo.clone()),
            stats: StatsService::new(snippet_repo),
            snippets,
            version_repo,
            db,
        }
    }

    /// Context for the default account.
    pub async fn ctx(&self) -> AccountContext {
        let account = self.accounts.default_account().await.unwrap();
        AccountContext::from(&account)
    }

    /// Context for a second, independent account.
    pub async fn other_ctx(&self, username: &str) -> AccountContext {
        let now = chrono::Utc::now();
        let account = codekeep_entity::account::Account {
            id: Uuid::new_v4(),
            username: username.to_string(),
            api_key: codekeep_entity::account::generate_api_key(),
            created_at: now,
            updated_at: now,
        };
        let repo = AccountRepository::new(self.db.pool().clone());
        let stored = repo.insert_if_absent(&account).await.unwrap();
        AccountContext::from(&stored)
    }

    pub async fn create(&self, ctx: &AccountContext, name: &str, code: &str) -> Snippet {
        self.snippets
            .create(
                ctx,
                CreateSnippet {
                    name: name.to_string(),
                    description: format!("{name} description"),
                    code: code.to_string(),
                    language: "rust".to_string(),
                    tags: vec!["demo".to_string()],
                    folder_id: None,
                },
            )
            .await
            .unwrap()
    }

    pub async fn set_code(&self, ctx: &AccountContext, id: Uuid, code: &str) -> Snippet {
        self.snippets
            .update(
                ctx,
                id,
                &UpdateSnippet {
                    code: FieldUpdate::SetTo(code.to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
    }
}

/// Canned assistant answers, optionally failing or slow.
#[derive(Debug, Default)]
pub struct StubAssistant {
    fail: bool,
    delay: Option<Duration>,
}

impl StubAssistant {
    pub fn failing() -> Self {
        Self {
            fail: true,
            delay: None,
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            fail: false,
            delay: Some(delay),
        }
    }

    async fn answer<T>(&self, value: T) -> AppResult<T> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            Err(AppError::internal("model exploded"))
        } else {
            Ok(value)
        }
    }
}

#[async_trait]
impl Assistant for StubAssistant {
    fn name(&self) -> &str {
        "stub"
    }

    async fn explain(&self, _code: &str, language: &str) -> AppResult<String> {
        self.answer(format!("explained {language}")).await
    }

    async fn convert(&self, _code: &str, from: &str, to: &str) -> AppResult<String> {
        self.answer(format!("converted {from}->{to}")).await
    }

    async fn find_bugs(&self, _code: &str, _language: &str) -> AppResult<Vec<BugReport>> {
        self.answer(vec![BugReport {
            line: 1,
            bug: "off by one".to_string(),
            suggestion: "use ..=".to_string(),
        }])
        .await
    }

    async fn generate_tests(&self, _code: &str, language: &str) -> AppResult<String> {
        self.answer(format!("tests for {language}")).await
    }

    async fn suggest_details(&self, _code: &str, _language: &str) -> AppResult<SnippetDetails> {
        self.answer(SnippetDetails {
            name: "Helper".to_string(),
            description: "Does things".to_string(),
            tags: vec![" rust".to_string(), "util".to_string(), "rust".to_string()],
        })
        .await
    }

    async fn render_image(
        &self,
        _code: &str,
        _language: &str,
        theme: ImageTheme,
    ) -> AppResult<String> {
        self.answer(format!("data:image/png;base64,{}", theme.as_str()))
            .await
    }
}
