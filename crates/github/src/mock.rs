//! Mock GitHub Service Implementation
//!
//! Programmable mock for testing the invitation and repository flows:
//! - `MockGitHubService`: per-endpoint replies with call recording
//! - `MockReply`: an HTTP status and JSON body, or a transport failure
//!
//! Replies go through the same status rules as the real client, so a mock
//! 404 on a membership check means "not a member" and a mock 422 on an
//! invitation carries its body for classification.
//!
//! A panic while a lock is held does not disable the mock: poisoned locks are
//! recovered, since every write leaves the maps in a consistent state.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use pit_common::Credential;
use serde_json::{json, Value};

use crate::{GitHubError, GitHubService, GitHubUser, InvitationPayload, OrgInvitation};

/// Which GitHub call a reply or recording belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GitHubEndpoint {
    GetUser,
    CreateInvitation,
    CheckMembership,
    ListInvitations,
    ListRepos,
}

/// What the mock answers for an endpoint
#[derive(Debug, Clone, PartialEq)]
pub enum MockReply {
    Respond { status: u16, body: Value },
    TransportError(String),
}

impl MockReply {
    pub fn ok(body: Value) -> Self {
        Self::Respond { status: 200, body }
    }

    pub fn status(status: u16, body: Value) -> Self {
        Self::Respond { status, body }
    }

    pub fn transport_error(message: impl Into<String>) -> Self {
        Self::TransportError(message.into())
    }

    /// The reply as the real client would surface it
    fn into_result(self) -> Result<Value, GitHubError> {
        match self {
            MockReply::Respond { status, body } if (200..300).contains(&status) => Ok(body),
            MockReply::Respond { status, body } => Err(GitHubError::Response {
                status,
                body: match body {
                    Value::String(text) => text,
                    Value::Null => String::new(),
                    other => other.to_string(),
                },
            }),
            MockReply::TransportError(message) => Err(GitHubError::Request(message)),
        }
    }
}

/// Default replies: a happy-path organization with no members or invitations
fn default_replies() -> HashMap<GitHubEndpoint, MockReply> {
    HashMap::from([
        (
            GitHubEndpoint::GetUser,
            MockReply::ok(json!({"id": 1, "login": "mock-user"})),
        ),
        (
            GitHubEndpoint::CreateInvitation,
            MockReply::status(201, json!({"id": 1})),
        ),
        (
            GitHubEndpoint::CheckMembership,
            MockReply::status(404, json!({"message": "Not Found"})),
        ),
        (GitHubEndpoint::ListInvitations, MockReply::ok(json!([]))),
        (GitHubEndpoint::ListRepos, MockReply::ok(json!([]))),
    ])
}

/// A recorded GitHub call for test assertions
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub endpoint: GitHubEndpoint,
    /// Login for user and membership calls
    pub login: Option<String>,
    /// Body of invitation calls
    pub payload: Option<InvitationPayload>,
}

/// Mock GitHub service with programmable replies
#[derive(Debug, Clone)]
pub struct MockGitHubService {
    replies: Arc<RwLock<HashMap<GitHubEndpoint, MockReply>>>,
    history: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockGitHubService {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(RwLock::new(default_replies())),
            history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Configure the reply for one endpoint
    pub fn set_reply(&self, endpoint: GitHubEndpoint, reply: MockReply) {
        self.replies
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(endpoint, reply);
    }

    /// Builder-style variant of [`Self::set_reply`]
    pub fn with_reply(self, endpoint: GitHubEndpoint, reply: MockReply) -> Self {
        self.set_reply(endpoint, reply);
        self
    }

    /// Return all recorded calls, oldest first.
    pub fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.history().clone()
    }

    /// Endpoints called, in order
    pub fn called_endpoints(&self) -> Vec<GitHubEndpoint> {
        self.recorded_calls()
            .into_iter()
            .map(|call| call.endpoint)
            .collect()
    }

    pub fn call_count(&self, endpoint: GitHubEndpoint) -> usize {
        self.recorded_calls()
            .iter()
            .filter(|call| call.endpoint == endpoint)
            .count()
    }

    /// Restore default replies and clear history.
    pub fn reset(&self) {
        *self
            .replies
            .write()
            .unwrap_or_else(PoisonError::into_inner) = default_replies();
        self.history().clear();
    }

    fn history(&self) -> MutexGuard<'_, Vec<RecordedCall>> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(
        &self,
        endpoint: GitHubEndpoint,
        login: Option<&str>,
        payload: Option<&InvitationPayload>,
    ) -> MockReply {
        tracing::debug!(?endpoint, "Mock GitHub: recording call");
        self.history().push(RecordedCall {
            endpoint,
            login: login.map(str::to_string),
            payload: payload.cloned(),
        });

        self.replies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&endpoint)
            .cloned()
            .unwrap_or_else(|| MockReply::status(404, json!({"message": "Not Found"})))
    }
}

impl Default for MockGitHubService {
    fn default() -> Self {
        Self::new()
    }
}

fn decode<T: serde::de::DeserializeOwned>(body: Value) -> Result<T, GitHubError> {
    serde_json::from_value(body)
        .map_err(|e| GitHubError::Decode(format!("Failed to parse response: {}", e)))
}

#[async_trait::async_trait]
impl GitHubService for MockGitHubService {
    async fn get_user(&self, _token: &Credential, login: &str) -> Result<GitHubUser, GitHubError> {
        let body = self
            .record(GitHubEndpoint::GetUser, Some(login), None)
            .into_result()?;
        decode(body)
    }

    async fn create_invitation(
        &self,
        _token: &Credential,
        payload: &InvitationPayload,
    ) -> Result<(), GitHubError> {
        self.record(GitHubEndpoint::CreateInvitation, None, Some(payload))
            .into_result()?;
        Ok(())
    }

    async fn check_membership(
        &self,
        _token: &Credential,
        login: &str,
    ) -> Result<bool, GitHubError> {
        match self
            .record(GitHubEndpoint::CheckMembership, Some(login), None)
            .into_result()
        {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn list_invitations(
        &self,
        _token: &Credential,
    ) -> Result<Vec<OrgInvitation>, GitHubError> {
        let body = self
            .record(GitHubEndpoint::ListInvitations, None, None)
            .into_result()?;
        decode(body)
    }

    async fn list_repos(&self, _token: &Credential) -> Result<Value, GitHubError> {
        let body = self
            .record(GitHubEndpoint::ListRepos, None, None)
            .into_result()?;
        Ok(body)
    }
}
