//! Auth domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::is_valid_email;
use crate::{errors::ValidationError, Error, Result};

/// Minimum accepted password length, matching the hosted auth provider's
/// default policy.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// The authenticated user as reported by the auth provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// An authenticated session with its tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub user: AuthUser,
}

impl AuthSession {
    /// Returns true if the session's access token has expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Convenience wrapper using the current time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Input model for signing in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Validates the credentials before they are sent to the auth provider.
    pub fn validate(&self) -> Result<()> {
        if !is_valid_email(&self.email) {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Email address is not valid".to_string(),
            )));
        }
        if self.password.is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "password".to_string(),
            )));
        }
        Ok(())
    }
}

/// Input model for creating a new account with the auth provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpData {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl SignUpData {
    /// Validates the sign-up data.
    pub fn validate(&self) -> Result<()> {
        if !is_valid_email(&self.email) {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Email address is not valid".to_string(),
            )));
        }
        if self.password.len() < MIN_PASSWORD_LENGTH {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            ))));
        }
        if self.first_name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "firstName".to_string(),
            )));
        }
        if self.last_name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "lastName".to_string(),
            )));
        }
        Ok(())
    }
}
