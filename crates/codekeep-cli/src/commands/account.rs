//! Account commands.

use clap::{Args, Subcommand};

use codekeep_core::error::AppError;
use codekeep_entity::account::Account;

use crate::output::{self, OutputFormat};

/// Arguments for account commands
#[derive(Debug, Args)]
pub struct AccountArgs {
    /// Account subcommand
    #[command(subcommand)]
    pub command: AccountCommand,
}

/// Account subcommands
#[derive(Debug, Subcommand)]
pub enum AccountCommand {
    /// Show the account and its API key
    Show,
    /// Issue a new API key; the old one stops working
    RotateKey {
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

fn print_account(account: &Account, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            output::print_kv("Username", &account.username);
            output::print_kv("ID", &account.id.to_string());
            output::print_kv("API key", &account.api_key);
            output::print_kv("Created", &account.created_at.format("%Y-%m-%d %H:%M").to_string());
        }
        OutputFormat::Json => output::print_json(account),
    }
}

/// Execute account commands
pub async fn execute(
    args: &AccountArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let session = super::Session::open(config_path).await?;
    let accounts = &session.state.account_service;

    match &args.command {
        AccountCommand::Show => {
            let account = accounts.current(&session.ctx).await?;
            print_account(&account, format);
        }
        AccountCommand::RotateKey { force } => {
            if !super::confirm("Rotate the API key? Clients using the old key will be rejected.", *force)? {
                println!("Cancelled.");
            } else {
                let account = accounts.rotate_api_key(&session.ctx).await?;
                output::print_success("API key rotated");
                print_account(&account, format);
            }
        }
    }

    session.close().await;
    Ok(())
}
