//! Outcome codes reported back to the browser
//!
//! Every invitation attempt ends in exactly one code, and every code maps to
//! a redirect to the invite page.

use std::fmt;

/// Page the invitation form lives on
pub const INVITE_PAGE: &str = "/invite";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeCode {
    MissingIdentifier,
    ServerConfig,
    UserNotFound,
    Success,
    AlreadyMember,
    PendingInvitation,
    MembershipConflict,
    ValidationFailed,
    NeedOrgAdmin,
    PermissionDenied,
    GithubApi,
    Unexpected,
}

impl OutcomeCode {
    #[cfg(test)]
    pub const ALL: [OutcomeCode; 12] = [
        OutcomeCode::MissingIdentifier,
        OutcomeCode::ServerConfig,
        OutcomeCode::UserNotFound,
        OutcomeCode::Success,
        OutcomeCode::AlreadyMember,
        OutcomeCode::PendingInvitation,
        OutcomeCode::MembershipConflict,
        OutcomeCode::ValidationFailed,
        OutcomeCode::NeedOrgAdmin,
        OutcomeCode::PermissionDenied,
        OutcomeCode::GithubApi,
        OutcomeCode::Unexpected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeCode::MissingIdentifier => "missing-identifier",
            OutcomeCode::ServerConfig => "server-config",
            OutcomeCode::UserNotFound => "user-not-found",
            OutcomeCode::Success => "success",
            OutcomeCode::AlreadyMember => "already-member",
            OutcomeCode::PendingInvitation => "pending-invitation",
            OutcomeCode::MembershipConflict => "membership-conflict",
            OutcomeCode::ValidationFailed => "validation-failed",
            OutcomeCode::NeedOrgAdmin => "need-org-admin",
            OutcomeCode::PermissionDenied => "permission-denied",
            OutcomeCode::GithubApi => "github-api",
            OutcomeCode::Unexpected => "unexpected",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, OutcomeCode::Success)
    }

    /// `/invite?success=true` or `/invite?error=<code>`
    pub fn redirect_location(&self) -> String {
        if self.is_success() {
            format!("{}?success=true", INVITE_PAGE)
        } else {
            format!("{}?error={}", INVITE_PAGE, self.as_str())
        }
    }
}

impl fmt::Display for OutcomeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
