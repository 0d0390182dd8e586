//! Organization invitation API handler
//!
//! The browser posts the invite form here and is always redirected back to
//! the invite page with the outcome in the query string.

use axum::{extract::State, response::Redirect};

use crate::api::extractors::InviteForm;
use crate::api::middleware::InvitationsState;
use crate::InvitationWorkflow;

/// Invite a person to the organization
///
/// **POST /api/invite**
///
/// URL-encoded or multipart `identifier`. Responds with `303 See Other` to
/// `/invite?success=true` or `/invite?error=<code>`; an unreadable body
/// redirects to `/invite?error=unexpected`.
pub async fn invite(State(state): State<InvitationsState>, form: InviteForm) -> Redirect {
    let outcome = InvitationWorkflow::new(state.github.as_ref(), &state.env)
        .run(form.identifier.as_deref())
        .await;

    Redirect::to(&outcome.redirect_location())
}
