use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::Deserialize;

use crate::domain::error::{AppError, Result};

/// Service configuration, layered from `PromptVault.toml` (optional)
/// under `PROMPTVAULT_`-prefixed environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// When set, CORS is restricted to this origin; otherwise any origin
    /// is accepted (development default).
    pub cors_origin: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Figment::new()
            .merge(Toml::file("PromptVault.toml"))
            .merge(Env::prefixed("PROMPTVAULT_"))
            .extract()
            .map_err(|e| AppError::Internal(format!("invalid configuration: {}", e)))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            bind: default_bind(),
            port: default_port(),
            cors_origin: None,
        }
    }
}

fn default_database_url() -> String {
    "sqlite://promptvault.db".to_string()
}

fn default_bind() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8787
}
