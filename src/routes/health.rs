//! GET /health

use axum::Json;
use axum::extract::State;
use std::sync::Arc;

use crate::session::SessionStore;
use crate::types::HealthResponse;

/// Liveness check with the current session count.
pub async fn health(State(state): State<Arc<crate::AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        sessions: state.sessions.len(),
    })
}
