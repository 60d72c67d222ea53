use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::start_session;
use super::ApiError;
use super::ApiSuccess;
use crate::account::errors::AccountError;
use crate::account::models::EmailAddress;
use crate::account::models::LoginCommand;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::cookies::SetCookie;
use crate::inbound::http::router::AppState;

/// Describes the login form; target of the protected-route redirect.
pub async fn login_form() -> ApiSuccess<LoginFormData> {
    ApiSuccess::new(
        StatusCode::OK,
        LoginFormData {
            title: "Login".to_string(),
            fields: vec!["email".to_string(), "password".to_string()],
        },
    )
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<(SetCookie, ApiSuccess<LoginResponseData>), ApiError> {
    let email = EmailAddress::new(&body.email)
        .map_err(|_| ApiError::Unauthorized(AccountError::InvalidCredentials.to_string()))?;

    let account = state
        .account_service
        .authenticate(LoginCommand::new(email, body.password))
        .await?;

    let session = start_session(&state, &account.email)?;
    tracing::info!(email = %account.email, "Session started");

    Ok((
        session,
        ApiSuccess::new(
            StatusCode::OK,
            LoginResponseData {
                email: account.email.to_string(),
                name: account.name.as_str().to_string(),
            },
        ),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginFormData {
    pub title: String,
    pub fields: Vec<String>,
}
