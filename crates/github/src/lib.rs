//! GitHub REST API Service
//!
//! Provides the organization calls the website needs:
//! - User lookup by login
//! - Organization invitations (create, list) and membership checks
//! - Organization repository listing
//!
//! A reqwest-backed client is used in production and a programmable mock
//! for tests and local development.

pub mod client;
pub mod mock;

use std::time::Duration;

use pit_common::{Config, Credential, ORGANIZATION};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("GitHub configuration error: {0}")]
    Configuration(String),

    /// No response was received (connection failure, timeout)
    #[error("GitHub request error: {0}")]
    Request(String),

    /// GitHub answered with a non-success status
    #[error("GitHub API returned {status}: {body}")]
    Response { status: u16, body: String },

    /// A success response whose body could not be decoded
    #[error("GitHub decode error: {0}")]
    Decode(String),
}

impl GitHubError {
    /// Upstream HTTP status, when a response was received
    pub fn status(&self) -> Option<u16> {
        match self {
            GitHubError::Response { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Body of `POST /orgs/{org}/invitations`: exactly one of email or invitee id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InvitationPayload {
    Email { email: String },
    Invitee { invitee_id: u64 },
}

/// The subset of a GitHub user object the invitation flow needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubUser {
    pub id: u64,
    #[serde(default)]
    pub login: String,
}

/// A pending organization invitation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgInvitation {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub login: Option<String>,
}

impl OrgInvitation {
    /// Whether this invitation targets `identifier` by email or login.
    /// GitHub treats both case-insensitively.
    pub fn matches(&self, identifier: &str) -> bool {
        let eq = |field: &Option<String>| {
            field
                .as_deref()
                .is_some_and(|value| value.eq_ignore_ascii_case(identifier))
        };
        eq(&self.email) || eq(&self.login)
    }
}

/// GitHub service configuration
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// GitHub provider (github, mock)
    pub provider: String,
    /// REST API base URL
    pub api_base_url: String,
    /// Organization every org-scoped call targets
    pub organization: String,
    /// Per-call timeout
    pub timeout: Duration,
}

impl From<&Config> for GitHubConfig {
    fn from(config: &Config) -> Self {
        Self {
            provider: config.github_provider.clone(),
            api_base_url: config.github_api_base_url.clone(),
            organization: ORGANIZATION.to_string(),
            timeout: Duration::from_secs(config.github_timeout_secs),
        }
    }
}

/// GitHub service trait for different implementations.
///
/// Every call carries the per-request credential.
#[async_trait::async_trait]
pub trait GitHubService: Send + Sync {
    /// `GET /users/{login}`
    async fn get_user(&self, token: &Credential, login: &str) -> Result<GitHubUser, GitHubError>;

    /// `POST /orgs/{org}/invitations`
    async fn create_invitation(
        &self,
        token: &Credential,
        payload: &InvitationPayload,
    ) -> Result<(), GitHubError>;

    /// `GET /orgs/{org}/members/{login}`: `true` on 2xx, `false` on 404.
    async fn check_membership(&self, token: &Credential, login: &str)
        -> Result<bool, GitHubError>;

    /// `GET /orgs/{org}/invitations`
    async fn list_invitations(&self, token: &Credential)
        -> Result<Vec<OrgInvitation>, GitHubError>;

    /// `GET /orgs/{org}/repos`, passed through untouched
    async fn list_repos(&self, token: &Credential) -> Result<serde_json::Value, GitHubError>;
}

/// Factory for creating GitHubService implementations.
pub struct GitHubServiceFactory;

impl GitHubServiceFactory {
    /// Create a GitHubService based on configuration.
    pub fn create(config: GitHubConfig) -> Result<Box<dyn GitHubService>, GitHubError> {
        match config.provider.as_str() {
            "github" => {
                tracing::info!(base_url = %config.api_base_url, "Creating GitHub client service");
                Ok(Box::new(client::GitHubClient::new(config)?))
            }
            "mock" => {
                tracing::info!("Creating mock GitHub service");
                Ok(Box::new(mock::MockGitHubService::new()))
            }
            provider => Err(GitHubError::Configuration(format!(
                "Unknown GitHub provider: {}. Supported providers: github, mock",
                provider
            ))),
        }
    }
}
