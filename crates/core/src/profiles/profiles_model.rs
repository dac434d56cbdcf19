//! Profile domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::FieldError;
use crate::utils::is_valid_email;
use crate::{errors::ValidationError, Error, Result};

/// Domain model representing a user's profile.
///
/// Keyed by the auth user's id; there is exactly one profile per user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// First and last name joined for display.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Input model for creating a profile, usually right after sign-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl NewProfile {
    /// Validates the new profile data.
    pub fn validate(&self) -> Result<()> {
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
        if !is_valid_email(&self.email) {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Email address is not valid".to_string(),
            )));
        }
        Ok(())
    }
}

/// Input model for updating a profile. Absent fields are left as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
}

impl ProfileUpdate {
    /// Returns true when the patch carries no changes.
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.avatar_url.is_none()
    }

    /// Validates the fields that are present.
    pub fn validate(&self) -> Result<()> {
        if let Some(first_name) = &self.first_name {
            if first_name.trim().is_empty() {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "First name cannot be empty".to_string(),
                )));
            }
        }
        if let Some(last_name) = &self.last_name {
            if last_name.trim().is_empty() {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "Last name cannot be empty".to_string(),
                )));
            }
        }
        if let Some(email) = &self.email {
            if !is_valid_email(email) {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "Email address is not valid".to_string(),
                )));
            }
        }
        Ok(())
    }
}

/// Raw form input from the account settings form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl ProfileDraft {
    /// Validates the draft, collecting every field error rather than
    /// stopping at the first.
    pub fn validate(&self) -> std::result::Result<ProfileUpdate, Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.first_name.trim().is_empty() {
            errors.push(FieldError::new("firstName", "First name is required"));
        }
        if self.last_name.trim().is_empty() {
            errors.push(FieldError::new("lastName", "Last name is required"));
        }
        if !is_valid_email(self.email.trim()) {
            errors.push(FieldError::new("email", "Email address is not valid"));
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ProfileUpdate {
            first_name: Some(self.first_name.trim().to_string()),
            last_name: Some(self.last_name.trim().to_string()),
            email: Some(self.email.trim().to_string()),
            avatar_url: None,
        })
    }
}
