use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::account::errors::AccountNameError;
use crate::account::errors::EmailError;

/// Registered account.
///
/// Only the email travels in session tokens; the rest stays server-side.
#[derive(Debug, Clone)]
pub struct Account {
    pub email: EmailAddress,
    pub name: AccountName,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Email address type
///
/// Validated with an RFC 5322 parser and normalized to lowercase, so it can be
/// used as the account key and the session identity claim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Arguments
    /// * `email` - Raw email string (surrounding whitespace is ignored)
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: &str) -> Result<Self, EmailError> {
        let email = email.trim().to_lowercase();
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name type
///
/// Trimmed, 1-64 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountName(String);

impl AccountName {
    const MAX_LENGTH: usize = 64;

    pub fn new(name: &str) -> Result<Self, AccountNameError> {
        let name = name.trim();
        let length = name.chars().count();

        if length == 0 {
            Err(AccountNameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(AccountNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Command to register a new account with domain types
#[derive(Debug)]
pub struct RegisterCommand {
    pub email: EmailAddress,
    pub name: AccountName,
    pub password: String,
}

impl RegisterCommand {
    /// Construct a new register command.
    ///
    /// # Arguments
    /// * `email` - Validated email address
    /// * `name` - Validated display name
    /// * `password` - Plain text password (will be hashed by service)
    pub fn new(email: EmailAddress, name: AccountName, password: String) -> Self {
        Self {
            email,
            name,
            password,
        }
    }
}

/// Command to check credentials for an existing account
#[derive(Debug)]
pub struct LoginCommand {
    pub email: EmailAddress,
    pub password: String,
}

impl LoginCommand {
    pub fn new(email: EmailAddress, password: String) -> Self {
        Self { email, password }
    }
}
