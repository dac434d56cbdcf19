//! Core error types for the Pulseboard application.
//!
//! This module defines backend-agnostic error types. Transport-specific errors
//! (HTTP statuses, hosted-backend error bodies) are converted to these types by
//! the cloud layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the application.
///
/// Backend-specific details are carried in string form to keep this type
/// independent of any particular hosted backend.
#[derive(Error, Debug)]
pub enum Error {
    /// No authenticated user. Raised by services before any backend call.
    #[error("No authenticated user")]
    Unauthenticated,

    #[error("Backend operation failed: {0}")]
    Backend(#[from] BackendError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Realtime subscription failed: {0}")]
    Realtime(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Backend-agnostic error type for data-access operations.
///
/// This enum uses `String` for all error details, allowing the cloud layer
/// to convert transport-specific errors (HTTP, PostgREST bodies) into this
/// format.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The request never produced a response (network failure, timeout).
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint was violated (e.g., duplicate key).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A not-null constraint was violated.
    #[error("Not-null constraint violation: {0}")]
    NotNullViolation(String),

    /// A foreign key constraint was violated.
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// A check constraint was violated.
    #[error("Check constraint violation: {0}")]
    CheckViolation(String),

    /// The caller is not allowed to access the rows (row-level security).
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// The access token was missing, expired, or rejected.
    #[error("Authentication rejected: {0}")]
    AuthRejected(String),

    /// Any other non-success response from the backend.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to serialize or deserialize a backend payload.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// A single field-level validation failure, suitable for display next to the
/// offending form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    /// One or more fields failed validation.
    #[error("{}", format_field_errors(.0))]
    Fields(Vec<FieldError>),
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl Error {
    /// Translates the error into a message suitable for end users.
    ///
    /// Constraint violations get friendly wording; expired sessions get a
    /// sign-in prompt; everything else falls back to the error's own message.
    pub fn user_message(&self) -> String {
        match self {
            Error::Backend(BackendError::UniqueViolation(_)) => {
                "This record already exists".to_string()
            }
            Error::Backend(BackendError::ForeignKeyViolation(_)) => {
                "Invalid reference to related data".to_string()
            }
            Error::Backend(BackendError::NotNullViolation(_)) => {
                "Required field is missing".to_string()
            }
            Error::Backend(BackendError::CheckViolation(_)) => {
                "Invalid value provided".to_string()
            }
            Error::Unauthenticated | Error::Backend(BackendError::AuthRejected(_)) => {
                "Your session has expired. Please sign in again.".to_string()
            }
            other => other.to_string(),
        }
    }

    /// Returns true if the error means the caller needs to (re-)authenticate.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Error::Unauthenticated | Error::Backend(BackendError::AuthRejected(_))
        )
    }

    /// Returns true if the error means the caller is signed in but not
    /// allowed to touch the requested rows.
    pub fn is_permission_error(&self) -> bool {
        matches!(self, Error::Backend(BackendError::PermissionDenied(_)))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
