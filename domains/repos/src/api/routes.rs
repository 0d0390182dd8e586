//! Route definitions for Repos domain API

use axum::{routing::get, Router};

use super::handlers::repos;
use super::middleware::ReposState;

/// Create all Repos domain API routes
pub fn routes() -> Router<ReposState> {
    Router::new().route("/api/repos", get(repos::list_repos))
}
