//! Shared request/response DTOs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// POST /api/login request body.
///
/// Clients send credentials under several field names; see
/// [`LoginRequest::credentials`] for the precedence.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<Value>,
    pub username: Option<Value>,
    pub user_email: Option<Value>,
    pub password: Option<Value>,
    pub user_password: Option<Value>,
}

impl LoginRequest {
    /// Resolve `(email, password)`, or `None` if either is missing.
    ///
    /// Email: `email`, then `username`, then `user_email`.
    /// Password: `password`, then `user_password`.
    pub fn credentials(&self) -> Option<(String, String)> {
        let email = [&self.email, &self.username, &self.user_email]
            .into_iter()
            .find_map(|v| v.as_ref().and_then(credential_text))?;
        let password = [&self.password, &self.user_password]
            .into_iter()
            .find_map(|v| v.as_ref().and_then(credential_text))?;
        Some((email, password))
    }
}

/// Text form of a credential value. Empty strings count as absent.
pub fn credential_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// User snapshot held by a session and returned to clients.
///
/// Never carries the password. `id` keeps upstream's JSON type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Value,
    pub email: String,
    pub name: String,
}

impl SessionUser {
    /// Project an upstream user record. `name` falls back to `fullName`,
    /// then to the email.
    pub fn from_upstream(record: &Value) -> Self {
        let email = record
            .get("email")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let name = ["name", "fullName"]
            .into_iter()
            .filter_map(|key| record.get(key).and_then(Value::as_str))
            .find(|s| !s.is_empty())
            .map(String::from)
            .unwrap_or_else(|| email.clone());

        Self {
            id: record.get("id").cloned().unwrap_or(Value::Null),
            email,
            name,
        }
    }
}

/// Upstream user lists come bare or wrapped in `{data}` / `{content}`.
pub fn unwrap_list(body: Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Object(mut map) => ["data", "content"]
            .into_iter()
            .find_map(|key| match map.remove(key) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// POST /api/login success response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub ok: bool,
    pub message: String,
    pub user: SessionUser,
}

/// GET /api/auth/current-login success response.
#[derive(Debug, Serialize)]
pub struct CurrentLoginResponse {
    pub ok: bool,
    pub user: SessionUser,
}

/// Generic `{ok, message}` response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub ok: bool,
    pub message: String,
}

/// GET /health response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub sessions: usize,
}
