//! Repos domain: list the organization's GitHub repositories

pub mod api;

// Re-export API types
pub use api::routes;
pub use api::ReposState;
