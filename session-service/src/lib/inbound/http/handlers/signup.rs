use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::start_session;
use super::ApiError;
use super::ApiSuccess;
use crate::account::models::Account;
use crate::account::models::AccountName;
use crate::account::models::EmailAddress;
use crate::account::models::RegisterCommand;
use crate::account::ports::AccountServicePort;
use crate::inbound::http::cookies::SetCookie;
use crate::inbound::http::router::AppState;

/// Register an account and sign it in straight away.
pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequestBody>,
) -> Result<(SetCookie, ApiSuccess<SignupResponseData>), ApiError> {
    let command = body.try_into_domain()?;

    let account = state.account_service.register(command).await?;
    let session = start_session(&state, &account.email)?;

    Ok((session, ApiSuccess::new(StatusCode::CREATED, (&account).into())))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignupRequestBody {
    email: String,
    name: String,
    password: String,
}

impl SignupRequestBody {
    fn try_into_domain(self) -> Result<RegisterCommand, ApiError> {
        let email =
            EmailAddress::new(&self.email).map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;
        let name =
            AccountName::new(&self.name).map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;
        Ok(RegisterCommand::new(email, name, self.password))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupResponseData {
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for SignupResponseData {
    fn from(account: &Account) -> Self {
        Self {
            email: account.email.to_string(),
            name: account.name.as_str().to_string(),
            created_at: account.created_at,
        }
    }
}
