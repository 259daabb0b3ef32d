//! HTTP client for the external users/departments API.
//!
//! One `reqwest::Client` with a fixed request timeout is shared by every
//! call; each client request maps to exactly one upstream attempt.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use std::time::Duration;

use crate::error::AppError;

/// Status and JSON body returned by upstream on success.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamReply {
    pub status: StatusCode,
    /// `Value::Null` when upstream sent an empty body.
    pub body: Value,
}

/// Relays upstream's status and body unchanged.
impl IntoResponse for UpstreamReply {
    fn into_response(self) -> Response {
        if self.status == StatusCode::NO_CONTENT {
            return self.status.into_response();
        }
        (self.status, Json(self.body)).into_response()
    }
}

pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
}

impl UpstreamClient {
    /// Build a client whose every request is bounded by `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| UpstreamError::RequestFailed(e.to_string()))?;
        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET /users
    pub async fn list_users(&self) -> Result<UpstreamReply, UpstreamError> {
        self.send(self.http.get(self.url("/users"))).await
    }

    /// POST /users
    pub async fn create_user(&self, body: &Value) -> Result<UpstreamReply, UpstreamError> {
        self.send(self.http.post(self.url("/users")).json(body))
            .await
    }

    /// PUT /users/{id}
    pub async fn update_user(&self, id: &str, body: &Value) -> Result<UpstreamReply, UpstreamError> {
        let path = format!("/users/{}", urlencoding::encode(id));
        self.send(self.http.put(self.url(&path)).json(body)).await
    }

    /// GET /departments
    pub async fn list_departments(&self) -> Result<UpstreamReply, UpstreamError> {
        self.send(self.http.get(self.url("/departments"))).await
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<UpstreamReply, UpstreamError> {
        let resp = request.send().await.map_err(UpstreamError::from_reqwest)?;

        // Capture status before consuming the body
        let status = resp.status();
        let bytes = resp.bytes().await.map_err(UpstreamError::from_reqwest)?;

        if !status.is_success() {
            let message = serde_json::from_slice::<Value>(&bytes)
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(String::from))
                .filter(|m| !m.is_empty());
            return Err(UpstreamError::Rejected { status, message });
        }

        let body = if bytes.iter().all(u8::is_ascii_whitespace) {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).map_err(|e| UpstreamError::InvalidBody(e.to_string()))?
        };

        Ok(UpstreamReply { status, body })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("upstream request timed out")]
    Timeout,

    #[error("upstream rejected request with {status}")]
    Rejected {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("upstream sent an unreadable body: {0}")]
    InvalidBody(String),
}

impl UpstreamError {
    fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            UpstreamError::Timeout
        } else {
            UpstreamError::RequestFailed(e.to_string())
        }
    }

    /// Translate into the client-facing error. Upstream's own status and
    /// message survive a rejection; anything else collapses to a 500 with
    /// `generic`.
    pub fn into_app_error(self, generic: &str) -> AppError {
        match self {
            UpstreamError::Rejected { status, message } => AppError::UpstreamRejected {
                status,
                message: message.unwrap_or_else(|| generic.to_string()),
            },
            _ => AppError::UpstreamUnavailable(generic.to_string()),
        }
    }
}
