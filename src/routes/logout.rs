//! POST /api/logout

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, header};
use axum::response::IntoResponse;
use std::sync::Arc;

use crate::ocsf;
use crate::session::SessionStore;
use crate::session::cookie::clear_session_cookie;
use crate::session::extract::session_token;
use crate::types::MessageResponse;

/// End the session named by the cookie (if any) and clear the cookie.
/// Always succeeds.
pub async fn logout(
    State(state): State<Arc<crate::AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let ended = session_token(&headers).and_then(|token| {
        // Best-effort lookup for the audit event before dropping the entry
        let user = state.sessions.resolve(&token);
        state.sessions.invalidate(&token);
        user
    });

    if let Some(user) = ended {
        ocsf::authentication_event(
            ocsf::ACTIVITY_LOGOFF,
            ocsf::STATUS_SUCCESS,
            ocsf::SEVERITY_INFORMATIONAL,
            Some(user.email.as_str()),
            "User logged out",
        );
    }

    (
        [(
            header::SET_COOKIE,
            clear_session_cookie(state.config.session_https_only),
        )],
        Json(MessageResponse {
            ok: true,
            message: "Logged out".into(),
        }),
    )
}
