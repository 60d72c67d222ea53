use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::LoginCommand;
use crate::account::models::RegisterCommand;
use crate::account::ports::AccountRepository;
use crate::account::ports::AccountServicePort;

/// Domain service implementation for account operations.
pub struct AccountService<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    password_hasher: auth::PasswordHasher,
}

impl<AR> AccountService<AR>
where
    AR: AccountRepository,
{
    /// Create a new account service with an injected repository.
    pub fn new(repository: Arc<AR>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl<AR> AccountServicePort for AccountService<AR>
where
    AR: AccountRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<Account, AccountError> {
        let password_hash = self.password_hasher.hash(&command.password)?;

        let account = Account {
            email: command.email,
            name: command.name,
            password_hash,
            created_at: Utc::now(),
        };

        let created = self.repository.create(account).await?;
        tracing::info!(email = %created.email, "Account registered");

        Ok(created)
    }

    async fn authenticate(&self, command: LoginCommand) -> Result<Account, AccountError> {
        let Some(account) = self.repository.find_by_email(&command.email).await? else {
            tracing::debug!(email = %command.email, "Login for unknown account");
            return Err(AccountError::InvalidCredentials);
        };

        if !self
            .password_hasher
            .verify(&command.password, &account.password_hash)?
        {
            tracing::debug!(email = %command.email, "Login with wrong password");
            return Err(AccountError::InvalidCredentials);
        }

        Ok(account)
    }
}
