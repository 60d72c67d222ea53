use auth::Claims;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::SessionState;

/// Signed-in area. Mounted behind a redirecting session guard.
pub async fn account(
    Extension(session): Extension<SessionState>,
) -> Result<ApiSuccess<AccountResponseData>, ApiError> {
    let user = session
        .user()
        .ok_or_else(|| ApiError::Unauthorized("Not signed in".to_string()))?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        AccountResponseData {
            email: user.email.clone(),
            claims: user.claims.clone(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountResponseData {
    pub email: String,
    pub claims: Claims,
}
