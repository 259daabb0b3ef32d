//! Resolving the session cookie on incoming requests.
//!
//! - `CurrentUser`: extractor for handlers that need the logged-in user
//! - `require_session`: middleware gating whole route groups

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;

use super::cookie::parse_cookies;
use super::{COOKIE_NAME, SessionStore};
use crate::AppState;
use crate::error::AppError;
use crate::types::SessionUser;

/// Session token from the request's `Cookie` header(s), if present.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let joined = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect::<Vec<_>>()
        .join("; ");

    parse_cookies(&joined)
        .remove(COOKIE_NAME)
        .filter(|token| !token.is_empty())
}

/// The user behind a valid session cookie.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub token: String,
    pub user: SessionUser,
}

impl CurrentUser {
    fn resolve(headers: &HeaderMap, state: &AppState) -> Option<Self> {
        let token = session_token(headers)?;
        let user = state.sessions.resolve(&token)?;
        Some(Self { token, user })
    }
}

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        CurrentUser::resolve(&parts.headers, state).ok_or(AppError::NotAuthenticated)
    }
}

/// Reject requests without a valid session with 401.
///
/// On success the session's `SessionUser` is added to request extensions.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let current = CurrentUser::resolve(req.headers(), &state).ok_or_else(|| {
        tracing::debug!(path = %req.uri().path(), "rejected request without session");
        AppError::NotAuthenticated
    })?;

    req.extensions_mut().insert(current.user);
    Ok(next.run(req).await)
}
