//! Invite form extractor
//!
//! The invite page may post URL-encoded or `multipart/form-data` bodies.
//! Both are read the same way: the first `identifier` field wins and every
//! other field is ignored.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::FormRejection,
        FromRequest, Multipart, Request,
    },
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Redirect, Response},
    Form,
};

use crate::OutcomeCode;

pub const IDENTIFIER_FIELD: &str = "identifier";

/// Invite form body
#[derive(Debug, Default, PartialEq)]
pub struct InviteForm {
    /// Email address or GitHub username, untrimmed
    pub identifier: Option<String>,
}

impl InviteForm {
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self {
            identifier: pairs
                .into_iter()
                .find(|(key, _)| key == IDENTIFIER_FIELD)
                .map(|(_, value)| value),
        }
    }
}

/// An unreadable invite body; answered with the `unexpected` redirect
#[derive(Debug, thiserror::Error)]
pub enum InviteFormRejection {
    #[error("Invalid form body: {0}")]
    Form(#[from] FormRejection),

    #[error("Invalid multipart body: {0}")]
    Multipart(#[from] MultipartRejection),

    #[error("Invalid multipart field: {0}")]
    Field(#[from] MultipartError),
}

impl IntoResponse for InviteFormRejection {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Unreadable invitation form");
        Redirect::to(&OutcomeCode::Unexpected.redirect_location()).into_response()
    }
}

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|content_type| {
            content_type
                .trim_start()
                .to_ascii_lowercase()
                .starts_with("multipart/form-data")
        })
}

impl<S> FromRequest<S> for InviteForm
where
    S: Send + Sync,
{
    type Rejection = InviteFormRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_multipart(&req) {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state).await?;
            return Ok(Self::from_pairs(pairs));
        }

        let mut multipart = Multipart::from_request(req, state).await?;
        while let Some(field) = multipart.next_field().await? {
            if field.name() == Some(IDENTIFIER_FIELD) {
                return Ok(Self {
                    identifier: Some(field.text().await?),
                });
            }
        }

        Ok(Self::default())
    }
}
