//! Invitations domain: invite a person to the organization by email or username

pub mod api;
pub mod domain;
pub mod workflow;

// Re-export domain types at the crate root for convenience
pub use domain::classify::{classify_failure, FailureClass};
pub use domain::identifier::Identifier;
pub use domain::outcome::OutcomeCode;
pub use workflow::InvitationWorkflow;

// Re-export API types
pub use api::routes;
pub use api::InvitationsState;
