//! Organization repository listing API handler

use axum::{extract::State, Json};
use pit_common::{Error, Result};
use pit_github::GitHubError;
use serde_json::Value;

use crate::api::middleware::ReposState;

/// List organization repositories
///
/// **GET /api/repos**
///
/// Returns GitHub's repository array verbatim. Upstream failures are
/// returned as `{"error": ...}` with the upstream status, or 500 when no
/// response was received.
pub async fn list_repos(State(state): State<ReposState>) -> Result<Json<Value>> {
    let token = state.env.github_token()?;

    let repos = state
        .github
        .list_repos(&token)
        .await
        .map_err(upstream_error)?;

    Ok(Json(repos))
}

/// Map a GitHub failure to the JSON error envelope.
///
/// A JSON error body is passed through as-is; anything else becomes a string.
fn upstream_error(err: GitHubError) -> Error {
    tracing::error!(error = %err, "Failed to list repositories");
    match err {
        GitHubError::Response { status, body } => Error::Upstream {
            status: Some(status),
            error: serde_json::from_str(&body).unwrap_or(Value::String(body)),
        },
        other => Error::Upstream {
            status: None,
            error: Value::String(other.to_string()),
        },
    }
}
