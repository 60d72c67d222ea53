use axum::extract::State;
use axum::response::Response;

use super::found;
use crate::inbound::http::cookies;
use crate::inbound::http::router::AppState;

/// Revoke the session cookie and go back to the index.
pub async fn logout(State(state): State<AppState>) -> (cookies::SetCookie, Response) {
    let cleared = cookies::set_cookie(cookies::cleared_cookie(&state.session.cookie_name));
    (cleared, found("/"))
}
