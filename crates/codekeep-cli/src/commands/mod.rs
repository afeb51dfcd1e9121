//! CLI command definitions and dispatch.

pub mod account;
pub mod folder;
pub mod migrate;
pub mod serve;
pub mod snippet;
pub mod stats;

use clap::{Parser, Subcommand};
use uuid::Uuid;

use codekeep_api::AppState;
use codekeep_core::config::AppConfig;
use codekeep_core::error::AppError;
use codekeep_database::DatabasePool;
use codekeep_database::migration::run_migrations;
use codekeep_service::AccountContext;

use crate::output::OutputFormat;

/// CodeKeep: a personal code snippet library
#[derive(Debug, Parser)]
#[command(name = "codekeep", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the CodeKeep server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Show the account or rotate its API key
    Account(account::AccountArgs),
    /// Snippet management
    Snippet(snippet::SnippetArgs),
    /// Folder management
    Folder(folder::FolderArgs),
    /// Library statistics
    Stats(stats::StatsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, &self.config).await,
            Commands::Migrate(args) => migrate::execute(args, &self.config).await,
            Commands::Account(args) => account::execute(args, &self.config, self.format).await,
            Commands::Snippet(args) => snippet::execute(args, &self.config, self.format).await,
            Commands::Folder(args) => folder::execute(args, &self.config, self.format).await,
            Commands::Stats(args) => stats::execute(args, &self.config, self.format).await,
        }
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(config_path)
}

/// Helper: connect to the configured database
pub async fn create_db_pool(config: &AppConfig) -> Result<DatabasePool, AppError> {
    DatabasePool::connect(&config.database).await
}

/// Everything a data command needs: wired services and the default
/// account's context.
pub struct Session {
    pub state: AppState,
    pub ctx: AccountContext,
}

impl Session {
    /// Loads config, connects, applies pending migrations and resolves the
    /// default account.
    pub async fn open(config_path: &str) -> Result<Self, AppError> {
        let config = load_config(config_path)?;
        let db = create_db_pool(&config).await?;
        run_migrations(db.pool()).await?;

        let state = AppState::new(config, db)?;
        let account = state.account_service.default_account().await?;
        Ok(Self {
            ctx: AccountContext::from(&account),
            state,
        })
    }

    /// Closes the pool so SQLite checkpoints cleanly.
    pub async fn close(self) {
        self.state.db.close().await;
    }
}

/// Helper: parse a UUID argument
pub fn parse_id(raw: &str, what: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::validation(format!("Invalid {what} id: {raw}")))
}

/// Helper: ask before a destructive action unless `force` is set
pub fn confirm(prompt: &str, force: bool) -> Result<bool, AppError> {
    if force {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))
}
