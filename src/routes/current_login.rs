//! GET /api/auth/current-login

use axum::Json;

use crate::session::extract::CurrentUser;
use crate::types::CurrentLoginResponse;

/// Return the user snapshot behind the session cookie. Does not extend the
/// session.
pub async fn current_login(current: CurrentUser) -> Json<CurrentLoginResponse> {
    Json(CurrentLoginResponse {
        ok: true,
        user: current.user,
    })
}
