//! Common error types and handling for the website API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

/// Body text returned for any configuration failure. Details stay in the logs.
pub const SERVER_CONFIGURATION_MESSAGE: &str = "Server configuration issue";

/// Common result type
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for JSON endpoints
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A failed upstream call. `status` is absent when no response arrived.
    #[error("Upstream error ({status:?}): {error}")]
    Upstream {
        status: Option<u16>,
        error: Value,
    },

    #[error("Unexpected error: {0}")]
    Unexpected(#[from] anyhow::Error),
}

impl Error {
    /// Get the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Configuration(_) | Error::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Upstream { status, .. } => status
                .and_then(|code| StatusCode::from_u16(code).ok())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }

    /// The value placed under `error` in the response body
    pub fn body(&self) -> Value {
        match self {
            Error::Configuration(_) => Value::String(SERVER_CONFIGURATION_MESSAGE.to_string()),
            Error::Upstream { error, .. } => error.clone(),
            Error::Unexpected(e) => Value::String(e.to_string()),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Internal server error");
        }

        (status, Json(json!({ "error": self.body() }))).into_response()
    }
}
