//! Start the CodeKeep server.

use clap::Args;

use codekeep_core::error::AppError;
use codekeep_database::migration::run_migrations;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Skip running database migrations on startup
    #[arg(long)]
    pub no_migrate: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, config_path: &str) -> Result<(), AppError> {
    let mut config = super::load_config(config_path)?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }

    println!("Starting CodeKeep server...");
    println!("  Host: {}", config.server.host);
    println!("  Port: {}", config.server.port);

    let db = super::create_db_pool(&config).await?;

    if !args.no_migrate {
        println!("Running database migrations...");
        run_migrations(db.pool()).await?;
        println!("  Migrations applied successfully.");
    }

    codekeep_api::run_server(config, db).await
}
