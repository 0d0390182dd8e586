//! Caller-supplied invitee identifier

use pit_github::InvitationPayload;

/// A trimmed, non-empty email address or GitHub username
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    Email(String),
    Username(String),
}

impl Identifier {
    /// Trim and classify raw input. Anything containing `@` is an email.
    ///
    /// Returns `None` for missing, empty, or whitespace-only input.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let trimmed = raw?.trim();
        if trimmed.is_empty() {
            return None;
        }

        if trimmed.contains('@') {
            Some(Identifier::Email(trimmed.to_string()))
        } else {
            Some(Identifier::Username(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Identifier::Email(value) | Identifier::Username(value) => value,
        }
    }

    pub fn is_email(&self) -> bool {
        matches!(self, Identifier::Email(_))
    }

    /// Payload for an email identifier; usernames need a user id lookup first.
    pub fn email_payload(&self) -> Option<InvitationPayload> {
        match self {
            Identifier::Email(email) => Some(InvitationPayload::Email {
                email: email.clone(),
            }),
            Identifier::Username(_) => None,
        }
    }
}
