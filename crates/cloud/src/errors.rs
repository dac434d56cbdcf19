//! Cloud-specific error types for hosted backend operations.
//!
//! This module provides error types that wrap HTTP transport failures and
//! backend error bodies and convert them to the backend-agnostic error types
//! defined in `pulseboard_core`.

use pulseboard_core::errors::{BackendError, Error};
use thiserror::Error;

/// Cloud-specific errors that wrap reqwest and response-body types.
///
/// These errors are internal to the cloud layer and are converted to
/// `pulseboard_core::Error` before being returned to callers.
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Response body error: {0}")]
    Body(#[from] serde_json::Error),

    #[error("API error {status}: {message}")]
    Api {
        status: u16,
        message: String,
        code: Option<String>,
    },
}

impl From<CloudError> for Error {
    fn from(err: CloudError) -> Self {
        match err {
            CloudError::Transport(e) => {
                Error::Backend(BackendError::RequestFailed(e.to_string()))
            }
            CloudError::Body(e) => Error::Backend(BackendError::Serialization(e.to_string())),
            CloudError::Api {
                status,
                message,
                code,
            } => Error::Backend(classify_api_error(status, &message, code.as_deref())),
        }
    }
}

/// Classifies a non-success response into the backend-agnostic error kinds.
///
/// The hosted backend reports constraint failures in the body text rather
/// than through distinct statuses, so the message is inspected alongside the
/// status code. `PGRST116` is the REST layer's "zero or many rows where one
/// was requested" code.
fn classify_api_error(status: u16, message: &str, code: Option<&str>) -> BackendError {
    let lower = message.to_lowercase();

    if code == Some("PGRST116") || status == 404 {
        return BackendError::NotFound(message.to_string());
    }
    if lower.contains("duplicate key") {
        return BackendError::UniqueViolation(message.to_string());
    }
    if lower.contains("null value") || lower.contains("not-null") {
        return BackendError::NotNullViolation(message.to_string());
    }
    if lower.contains("foreign key") {
        return BackendError::ForeignKeyViolation(message.to_string());
    }
    if lower.contains("check constraint") {
        return BackendError::CheckViolation(message.to_string());
    }
    if status == 401 || lower.contains("jwt") {
        return BackendError::AuthRejected(message.to_string());
    }
    if status == 403 || lower.contains("row-level security") || lower.contains("permission") {
        return BackendError::PermissionDenied(message.to_string());
    }
    BackendError::Api {
        status,
        message: message.to_string(),
    }
}

/// Extension trait to convert transport errors to core errors.
///
/// Since we can't implement `From<reqwest::Error> for Error` due to orphan
/// rules, this trait provides a method to perform the conversion.
pub trait TransportErrorExt {
    /// Convert to a core Error type.
    fn into_core_error(self) -> Error;
}

impl TransportErrorExt for reqwest::Error {
    fn into_core_error(self) -> Error {
        CloudError::Transport(self).into()
    }
}

impl TransportErrorExt for serde_json::Error {
    fn into_core_error(self) -> Error {
        CloudError::Body(self).into()
    }
}
