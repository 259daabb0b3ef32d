//! GET/POST /api/users, PUT /api/users/{id}
//!
//! Pass-through to upstream. Bodies go out untouched and come back with
//! upstream's status.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde_json::Value;
use std::sync::Arc;

use crate::error::AppError;
use crate::types::SessionUser;
use crate::upstream::UpstreamReply;

const FETCH_FAILED: &str = "Failed to fetch users: The external API is not responding.";
const CREATE_FAILED: &str = "Failed to create user via the external API.";
const UPDATE_FAILED: &str = "Failed to update user via the external API.";

fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, AppError> {
    body.map(|Json(v)| v)
        .map_err(|e| AppError::BadRequest(e.body_text()))
}

fn actor(user: &Option<Extension<SessionUser>>) -> &str {
    user.as_ref().map(|u| u.email.as_str()).unwrap_or("-")
}

pub async fn list_users(
    State(state): State<Arc<crate::AppState>>,
) -> Result<UpstreamReply, AppError> {
    state.upstream.list_users().await.map_err(|e| {
        tracing::warn!(error = %e, "GET /users proxy failed");
        e.into_app_error(FETCH_FAILED)
    })
}

pub async fn create_user(
    State(state): State<Arc<crate::AppState>>,
    user: Option<Extension<SessionUser>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<UpstreamReply, AppError> {
    let body = json_body(body)?;

    let reply = state.upstream.create_user(&body).await.map_err(|e| {
        tracing::warn!(error = %e, actor = actor(&user), "POST /users proxy failed");
        e.into_app_error(CREATE_FAILED)
    })?;

    tracing::info!(actor = actor(&user), status = %reply.status, "user created upstream");
    Ok(reply)
}

pub async fn update_user(
    State(state): State<Arc<crate::AppState>>,
    Path(id): Path<String>,
    user: Option<Extension<SessionUser>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<UpstreamReply, AppError> {
    let body = json_body(body)?;

    let reply = state.upstream.update_user(&id, &body).await.map_err(|e| {
        tracing::warn!(error = %e, actor = actor(&user), user_id = %id, "PUT /users proxy failed");
        e.into_app_error(UPDATE_FAILED)
    })?;

    tracing::info!(actor = actor(&user), user_id = %id, "user updated upstream");
    Ok(reply)
}
