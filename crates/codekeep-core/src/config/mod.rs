//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. Every field carries a serde default so that an empty or
//! missing file still yields a runnable configuration.

pub mod app;
pub mod assistant;
pub mod database;
pub mod logging;
pub mod sharing;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::assistant::AssistantConfig;
pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;
pub use self::sharing::{MIN_TOKEN_LENGTH, SharingConfig};

use crate::error::AppError;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "CODEKEEP";

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (base file + environment overlay + env vars).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Public share link settings.
    #[serde(default)]
    pub sharing: SharingConfig,
    /// AI assistant relay settings.
    #[serde(default)]
    pub assistant: AssistantConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// Merges the given file with a sibling overlay named after the
    /// `CODEKEEP_ENV` environment (default `development`) and environment
    /// variables prefixed with `CODEKEEP__` (e.g. `CODEKEEP__SERVER__PORT`).
    pub fn load(path: &str) -> Result<Self, AppError> {
        let env = std::env::var("CODEKEEP_ENV").unwrap_or_else(|_| "development".to_string());
        let overlay = overlay_path(path, &env);

        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::File::with_name(&overlay).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;
        loaded.sharing.validate()?;
        Ok(loaded)
    }
}

/// Build the overlay path `<dir>/<env>.toml` next to the base file.
fn overlay_path(base: &str, env: &str) -> String {
    let dir = Path::new(base)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    dir.join(format!("{env}.toml")).to_string_lossy().into_owned()
}
