//! Invitations domain state and panic containment

use axum::response::{IntoResponse, Redirect, Response};
use pit_common::LayeredEnv;
use pit_github::GitHubService;
use std::any::Any;
use std::sync::Arc;

use crate::OutcomeCode;

/// Application state for the Invitations domain
#[derive(Clone)]
pub struct InvitationsState {
    pub github: Arc<dyn GitHubService>,
    pub env: Arc<LayeredEnv>,
}

/// Turn a panic inside the invitation handler into the `unexpected` redirect.
pub fn redirect_on_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = %detail, "Unexpected error in invite API");

    Redirect::to(&OutcomeCode::Unexpected.redirect_location()).into_response()
}
