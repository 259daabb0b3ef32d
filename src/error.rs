//! Application error types with Axum response mapping.
//!
//! Every variant renders as `{"ok": false, "message": ...}` with the status
//! the client contract expects.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Email/username and password are required.")]
    MissingCredentials,

    #[error("{0}")]
    BadRequest(String),

    /// Unknown email and wrong password both map here.
    #[error("Invalid credentials.")]
    InvalidCredentials,

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Could not connect to the authentication service.")]
    AuthServiceUnavailable,

    /// Upstream answered with a non-success status; mirrored to the caller.
    #[error("{message}")]
    UpstreamRejected { status: StatusCode, message: String },

    #[error("{0}")]
    UpstreamUnavailable(String),

    #[error("Could not load {0}.")]
    ReferenceDataUnavailable(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingCredentials | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::NotAuthenticated => StatusCode::UNAUTHORIZED,
            AppError::UpstreamRejected { status, .. } => *status,
            AppError::AuthServiceUnavailable
            | AppError::UpstreamUnavailable(_)
            | AppError::ReferenceDataUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = json!({
            "ok": false,
            "message": self.to_string(),
        });

        (self.status(), axum::Json(body)).into_response()
    }
}
