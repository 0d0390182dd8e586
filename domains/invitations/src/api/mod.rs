//! API layer for the Invitations domain
//!
//! Contains HTTP handlers, routes, and domain state definition.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use extractors::InviteForm;
pub use middleware::InvitationsState;
pub use routes::routes;
