//! GitHub REST Client Implementation
//!
//! Calls the GitHub REST API (https://api.github.com) with a bearer token,
//! the versioned JSON media type, and a per-call timeout.

use pit_common::Credential;
use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode, Url};

use crate::{GitHubConfig, GitHubError, GitHubService, GitHubUser, InvitationPayload, OrgInvitation};

pub const API_VERSION: &str = "2022-11-28";
pub const MEDIA_TYPE: &str = "application/vnd.github+json";
const USER_AGENT: &str = concat!("pit-website-api/", env!("CARGO_PKG_VERSION"));
const INVITATIONS_PAGE_SIZE: &str = "100";

/// Real GitHub client bound to one organization.
pub struct GitHubClient {
    http: Client,
    base_url: Url,
    organization: String,
}

impl GitHubClient {
    /// Create a new GitHub client from configuration.
    pub fn new(config: GitHubConfig) -> Result<Self, GitHubError> {
        let base_url = Url::parse(&config.api_base_url).map_err(|e| {
            GitHubError::Configuration(format!(
                "Invalid GitHub API base URL {}: {}",
                config.api_base_url, e
            ))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(GitHubError::Configuration(format!(
                "GitHub API base URL cannot be a base: {}",
                config.api_base_url
            )));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| GitHubError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            organization: config.organization,
        })
    }

    /// Build an endpoint URL; each segment is percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, GitHubError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                GitHubError::Configuration("GitHub API base URL cannot be a base".to_string())
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url, token: &Credential) -> RequestBuilder {
        self.http
            .request(method, url)
            .bearer_auth(token.expose())
            .header(header::ACCEPT, MEDIA_TYPE)
            .header("X-GitHub-Api-Version", API_VERSION)
    }

    /// Send and return the raw response, whatever its status.
    async fn dispatch(&self, builder: RequestBuilder) -> Result<Response, GitHubError> {
        builder.send().await.map_err(|e| {
            if e.is_timeout() {
                GitHubError::Request(format!("GitHub request timed out: {}", e))
            } else {
                GitHubError::Request(format!("HTTP request failed: {}", e))
            }
        })
    }

    /// Send and fail on any non-2xx status, keeping the body for classification.
    async fn send(&self, builder: RequestBuilder) -> Result<Response, GitHubError> {
        let response = self.dispatch(builder).await?;
        if response.status().is_success() {
            return Ok(response);
        }
        Err(error_from_response(response).await)
    }
}

async fn error_from_response(response: Response) -> GitHubError {
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Failed to read response body".to_string());
    GitHubError::Response { status, body }
}

async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, GitHubError> {
    response
        .json()
        .await
        .map_err(|e| GitHubError::Decode(format!("Failed to parse response: {}", e)))
}

#[async_trait::async_trait]
impl GitHubService for GitHubClient {
    async fn get_user(&self, token: &Credential, login: &str) -> Result<GitHubUser, GitHubError> {
        let url = self.endpoint(&["users", login])?;
        tracing::debug!(%login, "Looking up GitHub user");
        let response = self.send(self.request(Method::GET, url, token)).await?;
        decode(response).await
    }

    async fn create_invitation(
        &self,
        token: &Credential,
        payload: &InvitationPayload,
    ) -> Result<(), GitHubError> {
        let url = self.endpoint(&["orgs", &self.organization, "invitations"])?;
        tracing::debug!(org = %self.organization, "Creating organization invitation");
        self.send(self.request(Method::POST, url, token).json(payload))
            .await?;
        Ok(())
    }

    async fn check_membership(
        &self,
        token: &Credential,
        login: &str,
    ) -> Result<bool, GitHubError> {
        let url = self.endpoint(&["orgs", &self.organization, "members", login])?;
        let response = self.dispatch(self.request(Method::GET, url, token)).await?;
        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            _ => Err(error_from_response(response).await),
        }
    }

    async fn list_invitations(
        &self,
        token: &Credential,
    ) -> Result<Vec<OrgInvitation>, GitHubError> {
        let mut url = self.endpoint(&["orgs", &self.organization, "invitations"])?;
        url.query_pairs_mut()
            .append_pair("per_page", INVITATIONS_PAGE_SIZE);
        let response = self.send(self.request(Method::GET, url, token)).await?;
        decode(response).await
    }

    async fn list_repos(&self, token: &Credential) -> Result<serde_json::Value, GitHubError> {
        let url = self.endpoint(&["orgs", &self.organization, "repos"])?;
        let response = self.send(self.request(Method::GET, url, token)).await?;
        decode(response).await
    }
}
