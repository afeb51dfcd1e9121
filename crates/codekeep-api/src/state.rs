//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use codekeep_core::config::AppConfig;
use codekeep_core::error::AppError;
use codekeep_database::DatabasePool;
use codekeep_database::repositories::{
    AccountRepository, FolderRepository, SnippetRepository, VersionRepository,
};
use codekeep_service::{
    AccessService, AccountService, AssistService, FolderService, RestoreService,
    ShareTokenGenerator, SnippetService, StatsService, VersionService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// SQLite connection pool
    pub db: DatabasePool,

    // ── Services ─────────────────────────────────────────────
    /// Accounts and API keys
    pub account_service: Arc<AccountService>,
    /// Snippet lifecycle and sharing
    pub snippet_service: Arc<SnippetService>,
    /// Version history reads
    pub version_service: Arc<VersionService>,
    /// Restore orchestrator
    pub restore_service: Arc<RestoreService>,
    /// Anonymous share access
    pub access_service: Arc<AccessService>,
    /// Folders
    pub folder_service: Arc<FolderService>,
    /// Dashboard statistics
    pub stats_service: Arc<StatsService>,
    /// Assistant relay
    pub assist_service: Arc<AssistService>,
}

impl AppState {
    /// Wires repositories and services over a connected, migrated pool.
    pub fn new(config: AppConfig, db: DatabasePool) -> Result<Self, AppError> {
        let assist = AssistService::from_config(&config.assistant)?;
        Ok(Self::with_assistant(config, db, assist))
    }

    /// Like [`AppState::new`] with an explicit assistant service.
    pub fn with_assistant(config: AppConfig, db: DatabasePool, assist: AssistService) -> Self {
        let pool = db.pool().clone();
        let account_repo = Arc::new(AccountRepository::new(pool.clone()));
        let snippet_repo = Arc::new(SnippetRepository::new(pool.clone()));
        let version_repo = Arc::new(VersionRepository::new(pool.clone()));
        let folder_repo = Arc::new(FolderRepository::new(pool));

        let tokens = Arc::new(ShareTokenGenerator::new(config.sharing.token_length));
        let snippet_service = Arc::new(SnippetService::new(
            db.clone(),
            Arc::clone(&snippet_repo),
            Arc::clone(&version_repo),
            Arc::clone(&folder_repo),
            tokens,
        ));

        Self {
            account_service: Arc::new(AccountService::new(account_repo)),
            version_service: Arc::new(VersionService::new(
                Arc::clone(&snippet_repo),
                Arc::clone(&version_repo),
            )),
            restore_service: Arc::new(RestoreService::new(
                db.clone(),
                Arc::clone(&snippet_repo),
                version_repo,
            )),
            access_service: Arc::new(AccessService::new(Arc::clone(&snippet_service))),
            folder_service: Arc::new(FolderService::new(
                db.clone(),
                folder_repo,
                Arc::clone(&snippet_repo),
            )),
            stats_service: Arc::new(StatsService::new(snippet_repo)),
            assist_service: Arc::new(assist),
            snippet_service,
            config: Arc::new(config),
            db,
        }
    }
}
