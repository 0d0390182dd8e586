//! Invitation workflow
//!
//! Runs the GitHub calls for one invitation attempt strictly in sequence and
//! reduces every path to an [`OutcomeCode`]:
//!
//! 1. parse the identifier (blank input never reaches GitHub)
//! 2. resolve the credential; look up the user id for usernames
//! 3. submit the organization invitation
//! 4. on failure, classify by status and body text
//! 5. for membership-type 422s, disambiguate with a membership check and then
//!    a scan of pending invitations
//!
//! Failed disambiguation queries are logged and treated as inconclusive.

use pit_common::{Credential, LayeredEnv};
use pit_github::{GitHubError, GitHubService, InvitationPayload};

use crate::domain::classify::{classify_failure, FailureClass};
use crate::domain::identifier::Identifier;
use crate::domain::outcome::OutcomeCode;

pub struct InvitationWorkflow<'a> {
    github: &'a dyn GitHubService,
    env: &'a LayeredEnv,
}

impl<'a> InvitationWorkflow<'a> {
    pub fn new(github: &'a dyn GitHubService, env: &'a LayeredEnv) -> Self {
        Self { github, env }
    }

    /// Run one invitation attempt for raw caller input.
    pub async fn run(&self, raw_identifier: Option<&str>) -> OutcomeCode {
        let outcome = match self.attempt(raw_identifier).await {
            Ok(outcome) | Err(outcome) => outcome,
        };
        tracing::info!(outcome = %outcome, "Invitation attempt finished");
        outcome
    }

    async fn attempt(&self, raw_identifier: Option<&str>) -> Result<OutcomeCode, OutcomeCode> {
        let identifier = Identifier::parse(raw_identifier).ok_or(OutcomeCode::MissingIdentifier)?;

        let token = self.env.github_token().map_err(|e| {
            tracing::error!(error = %e, "GitHub token unavailable");
            OutcomeCode::ServerConfig
        })?;

        tracing::info!(
            identifier = %identifier.as_str(),
            email = identifier.is_email(),
            "Inviting to organization"
        );

        let payload = self.resolve_payload(&token, &identifier).await?;

        match self.github.create_invitation(&token, &payload).await {
            Ok(()) => Ok(OutcomeCode::Success),
            Err(GitHubError::Response { status, body }) => {
                tracing::error!(status, body = %body, "GitHub rejected invitation");
                Ok(self.classify(&token, &identifier, status, &body).await)
            }
            Err(e) => {
                tracing::error!(error = %e, "Invitation request failed");
                Err(OutcomeCode::Unexpected)
            }
        }
    }

    /// Email identifiers are sent as-is; usernames are resolved to a user id.
    async fn resolve_payload(
        &self,
        token: &Credential,
        identifier: &Identifier,
    ) -> Result<InvitationPayload, OutcomeCode> {
        if let Some(payload) = identifier.email_payload() {
            return Ok(payload);
        }

        match self.github.get_user(token, identifier.as_str()).await {
            Ok(user) => Ok(InvitationPayload::Invitee {
                invitee_id: user.id,
            }),
            Err(e) if e.is_not_found() => {
                tracing::warn!(login = %identifier.as_str(), "GitHub user not found");
                Err(OutcomeCode::UserNotFound)
            }
            Err(e) => {
                tracing::error!(login = %identifier.as_str(), error = %e, "Failed to fetch user");
                Err(OutcomeCode::Unexpected)
            }
        }
    }

    async fn classify(
        &self,
        token: &Credential,
        identifier: &Identifier,
        status: u16,
        body: &str,
    ) -> OutcomeCode {
        match classify_failure(status, body) {
            FailureClass::MembershipConflict => self.disambiguate(token, identifier).await,
            FailureClass::ValidationFailed => OutcomeCode::ValidationFailed,
            FailureClass::NeedOrgAdmin => OutcomeCode::NeedOrgAdmin,
            FailureClass::PermissionDenied => OutcomeCode::PermissionDenied,
            FailureClass::GitHubApi => OutcomeCode::GithubApi,
        }
    }

    /// Decide between current member, pending invitation, and plain conflict.
    async fn disambiguate(&self, token: &Credential, identifier: &Identifier) -> OutcomeCode {
        match self.github.check_membership(token, identifier.as_str()).await {
            Ok(true) => return OutcomeCode::AlreadyMember,
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(error = %e, "Membership check inconclusive");
                return OutcomeCode::MembershipConflict;
            }
        }

        match self.github.list_invitations(token).await {
            Ok(invitations) => {
                if invitations
                    .iter()
                    .any(|invitation| invitation.matches(identifier.as_str()))
                {
                    return OutcomeCode::PendingInvitation;
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Pending invitation lookup inconclusive");
            }
        }

        OutcomeCode::MembershipConflict
    }
}
