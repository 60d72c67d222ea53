use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::SessionState;

/// Session-aware landing page; works with or without a session.
pub async fn index(Extension(session): Extension<SessionState>) -> ApiSuccess<IndexResponseData> {
    ApiSuccess::new(StatusCode::OK, (&session).into())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexResponseData {
    pub email: Option<String>,
    pub logged_in: bool,
}

impl From<&SessionState> for IndexResponseData {
    fn from(session: &SessionState) -> Self {
        let email = session.user().map(|user| user.email.clone());
        Self {
            logged_in: email.is_some(),
            email,
        }
    }
}
