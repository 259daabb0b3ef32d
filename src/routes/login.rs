//! POST /api/login
//!
//! Credentials are checked against the full user list from upstream. The
//! stored password is compared as plain text.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use std::sync::Arc;

use crate::error::AppError;
use crate::ocsf;
use crate::session::SessionStore;
use crate::session::cookie::session_cookie;
use crate::types::{LoginRequest, LoginResponse, SessionUser, credential_text, unwrap_list};

/// Authenticate against upstream and start a session.
pub async fn login(
    State(state): State<Arc<crate::AppState>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    // An unreadable body carries no credentials.
    let request = body.map(|Json(req)| req).unwrap_or_default();
    let (email, password) = request
        .credentials()
        .ok_or(AppError::MissingCredentials)?;

    let reply = state.upstream.list_users().await.map_err(|e| {
        tracing::error!(error = %e, "login: could not fetch user list");
        AppError::AuthServiceUnavailable
    })?;
    let users = unwrap_list(reply.body);

    let Some(record) = find_user(&users, &email, &password) else {
        ocsf::authentication_event(
            ocsf::ACTIVITY_LOGON,
            ocsf::STATUS_FAILURE,
            ocsf::SEVERITY_MEDIUM,
            Some(email.as_str()),
            "Invalid credentials",
        );
        return Err(AppError::InvalidCredentials);
    };

    let user = SessionUser::from_upstream(record);
    let token = state.sessions.create(user.clone());
    let cookie = session_cookie(
        &token,
        state.sessions.ttl(),
        state.config.session_https_only,
    );

    ocsf::authentication_event(
        ocsf::ACTIVITY_LOGON,
        ocsf::STATUS_SUCCESS,
        ocsf::SEVERITY_INFORMATIONAL,
        Some(user.email.as_str()),
        "Session created via password login",
    );

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(LoginResponse {
            ok: true,
            message: "Login successful".into(),
            user,
        }),
    )
        .into_response())
}

/// First user whose email matches exactly, if the password matches too.
///
/// Unknown email and wrong password are indistinguishable to the caller.
/// A record without a password never matches.
fn find_user<'a>(users: &'a [Value], email: &str, password: &str) -> Option<&'a Value> {
    let record = users
        .iter()
        .find(|u| u.get("email").and_then(Value::as_str) == Some(email))?;

    let stored = record.get("password").and_then(credential_text)?;
    (stored == password).then_some(record)
}
