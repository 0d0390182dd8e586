//! Configuration management following 12-factor app principles
//!
//! Startup configuration is loaded from environment variables. The GitHub
//! credential is deliberately absent here: it is resolved per request through
//! [`crate::env::LayeredEnv`].

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

/// The single GitHub organization this service manages.
pub const ORGANIZATION: &str = "parents-in-tech";

pub const DEFAULT_GITHUB_API_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_GITHUB_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// GitHub backend (github, mock)
    pub github_provider: String,
    /// REST base URL, overridable for tests and GitHub Enterprise
    pub github_api_base_url: String,
    /// Per-call timeout for every outbound GitHub request
    pub github_timeout_secs: u64,

    /// Dotenv-format file holding the runtime-provided environment map
    pub runtime_env_file: Option<String>,

    /// Comma-separated CORS origins (required by the Lambda entrypoint)
    pub cors_allowed_origins: Option<String>,

    /// Local server port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let github_provider = lookup("GITHUB_PROVIDER").unwrap_or_else(|| "github".to_string());
        if !matches!(github_provider.as_str(), "github" | "mock") {
            return Err(anyhow::anyhow!(
                "GITHUB_PROVIDER must be one of: github, mock (got {})",
                github_provider
            ));
        }

        let config = Self {
            github_provider,
            github_api_base_url: lookup("GITHUB_API_BASE_URL")
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_GITHUB_API_BASE_URL.to_string()),
            github_timeout_secs: lookup("GITHUB_TIMEOUT_SECS")
                .and_then(|secs| secs.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_GITHUB_TIMEOUT_SECS),

            runtime_env_file: lookup("RUNTIME_ENV_FILE").filter(|path| !path.trim().is_empty()),
            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS"),

            port: lookup("PORT")
                .and_then(|port| port.parse().ok())
                .unwrap_or(DEFAULT_PORT),
        };

        Ok(config)
    }
}
