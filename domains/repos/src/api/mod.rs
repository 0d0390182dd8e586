//! API layer for the Repos domain
//!
//! Contains the HTTP handler, routes, and domain state definition.

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::ReposState;
pub use routes::routes;
