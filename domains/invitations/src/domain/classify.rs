//! Classification of failed invitation submissions
//!
//! GitHub reports membership conflicts and admin requirements as
//! human-readable text, not structured codes. All matching against that text
//! lives here.

/// 422 error messages meaning "already in the org" or "already invited"
pub const MEMBERSHIP_PHRASES: [&str; 3] = [
    "already a part of this organization",
    "already a member",
    "pending invitation",
];

/// 403 body text meaning the token's owner is not an org admin
pub const ORG_ADMIN_PHRASE: &str = "admin to create an invitation";

/// First-pass classification of a failed `POST /orgs/{org}/invitations`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// 422 mentioning membership; needs the disambiguation queries
    MembershipConflict,
    /// Any other 422
    ValidationFailed,
    /// 403 requiring an org admin
    NeedOrgAdmin,
    /// Any other 403
    PermissionDenied,
    /// Any other status
    GitHubApi,
}

/// Messages from the `errors` array of a GitHub error body.
///
/// Entries may be objects with a `message` field or bare strings. A body that
/// is not JSON has no messages.
pub fn error_messages(body: &str) -> Vec<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return Vec::new();
    };

    value
        .get("errors")
        .and_then(|errors| errors.as_array())
        .map(|errors| {
            errors
                .iter()
                .filter_map(|entry| {
                    entry
                        .get("message")
                        .and_then(|message| message.as_str())
                        .or_else(|| entry.as_str())
                        .map(str::to_string)
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Whether a 422 body reports existing membership or a pending invitation
pub fn is_membership_conflict(body: &str) -> bool {
    error_messages(body).iter().any(|message| {
        MEMBERSHIP_PHRASES
            .iter()
            .any(|phrase| message.contains(phrase))
    })
}

/// Whether a 403 body says an org admin is required
pub fn needs_org_admin(body: &str) -> bool {
    body.contains(ORG_ADMIN_PHRASE)
}

pub fn classify_failure(status: u16, body: &str) -> FailureClass {
    match status {
        422 if is_membership_conflict(body) => FailureClass::MembershipConflict,
        422 => FailureClass::ValidationFailed,
        403 if needs_org_admin(body) => FailureClass::NeedOrgAdmin,
        403 => FailureClass::PermissionDenied,
        _ => FailureClass::GitHubApi,
    }
}
