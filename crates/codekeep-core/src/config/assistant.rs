//! AI assistant relay configuration.

use serde::{Deserialize, Serialize};

/// Settings for the external AI assistant endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Whether assistant features are enabled.
    #[serde(default)]
    pub enabled: bool,
    /// HTTP endpoint that accepts assistant task requests.
    #[serde(default)]
    pub endpoint: String,
    /// Optional bearer token sent to the endpoint.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Per-call timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: String::new(),
            api_key: None,
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}
