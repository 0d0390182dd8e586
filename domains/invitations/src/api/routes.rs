//! Route definitions for Invitations domain API

use axum::{routing::post, Router};
use tower_http::catch_panic::CatchPanicLayer;

use super::handlers::invite;
use super::middleware::{redirect_on_panic, InvitationsState};

/// Create all Invitations domain API routes
pub fn routes() -> Router<InvitationsState> {
    Router::new()
        .route("/api/invite", post(invite::invite))
        .layer(CatchPanicLayer::custom(redirect_on_panic))
}
