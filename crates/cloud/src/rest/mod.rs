//! REST repositories - hosted backend implementations of the core
//! data-access traits.
//!
//! Every request composes the fixed `user_id` filter, mirroring the
//! backend's row-level security policies; rows never cross user boundaries.

mod integrations;
mod kpis;
mod profiles;
mod sync_logs;

// Re-export the public interface
pub use integrations::IntegrationRepository;
pub use kpis::KpiRepository;
pub use profiles::ProfileRepository;
pub use sync_logs::SyncLogRepository;

use pulseboard_core::errors::{BackendError, Error};
use uuid::Uuid;

/// Error for lookups that matched no row after the user filter.
pub(crate) fn row_not_found(entity: &str, id: Uuid) -> Error {
    Error::Backend(BackendError::NotFound(format!(
        "{} {} not found",
        entity, id
    )))
}

/// Error for writes that should have returned the affected row.
///
/// Writes ask for the returned representation, so an empty result on a
/// success status means the backend misbehaved, not that the row is absent.
pub(crate) fn missing_returned_row(entity: &str) -> Error {
    Error::Unexpected(format!("Backend returned no {} row for a write", entity))
}
