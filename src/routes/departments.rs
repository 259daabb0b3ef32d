//! GET /api/departments

use axum::extract::State;
use std::sync::Arc;

use crate::error::AppError;
use crate::upstream::UpstreamReply;

const FETCH_FAILED: &str = "Failed to fetch departments from the external API.";

pub async fn list_departments(
    State(state): State<Arc<crate::AppState>>,
) -> Result<UpstreamReply, AppError> {
    state.upstream.list_departments().await.map_err(|e| {
        tracing::warn!(error = %e, "GET /departments proxy failed");
        e.into_app_error(FETCH_FAILED)
    })
}
