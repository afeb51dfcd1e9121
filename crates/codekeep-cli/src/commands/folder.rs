//! Folder management commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use codekeep_core::error::AppError;
use codekeep_entity::folder::Folder;

use super::{Session, confirm, parse_id};
use crate::output::{self, OutputFormat};

/// Arguments for folder commands
#[derive(Debug, Args)]
pub struct FolderArgs {
    /// Folder subcommand
    #[command(subcommand)]
    pub command: FolderCommand,
}

/// Folder subcommands
#[derive(Debug, Subcommand)]
pub enum FolderCommand {
    /// List folders by name
    List,
    /// Create a folder
    Create {
        /// Folder name
        name: String,
    },
    /// Rename a folder
    Rename {
        /// Folder id
        id: String,
        /// New name
        name: String,
    },
    /// Delete a folder; its snippets are kept
    Delete {
        /// Folder id
        id: String,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

/// Folder display row for table output
#[derive(Debug, Serialize, Tabled)]
struct FolderRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Created")]
    created_at: String,
}

impl From<&Folder> for FolderRow {
    fn from(f: &Folder) -> Self {
        Self {
            id: f.id.to_string(),
            name: f.name.clone(),
            created_at: f.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute folder commands
pub async fn execute(
    args: &FolderArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let session = Session::open(config_path).await?;
    let result = run(&args.command, &session, format).await;
    session.close().await;
    result
}

async fn run(command: &FolderCommand, session: &Session, format: OutputFormat) -> Result<(), AppError> {
    let ctx = &session.ctx;
    let folders = &session.state.folder_service;

    match command {
        FolderCommand::List => {
            let items = folders.list(ctx).await?;
            let rows: Vec<FolderRow> = items.iter().map(FolderRow::from).collect();
            output::print_list(&items, rows, format);
        }
        FolderCommand::Create { name } => {
            let folder = folders.create(ctx, name).await?;
            output::print_success(&format!("Folder '{}' created ({})", folder.name, folder.id));
        }
        FolderCommand::Rename { id, name } => {
            let folder = folders.rename(ctx, parse_id(id, "folder")?, name).await?;
            output::print_success(&format!("Folder renamed to '{}'", folder.name));
        }
        FolderCommand::Delete { id, force } => {
            let id = parse_id(id, "folder")?;
            let folder = folders.get(ctx, id).await?;
            let prompt = format!(
                "Delete folder '{}'? Its snippets will be kept without a folder.",
                folder.name
            );
            if !confirm(&prompt, *force)? {
                println!("Cancelled.");
                return Ok(());
            }
            folders.delete(ctx, id).await?;
            output::print_success(&format!("Folder '{}' deleted", folder.name));
        }
    }

    Ok(())
}
