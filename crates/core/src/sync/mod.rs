//! Sync module - sync log models, services, and the runner that drives one
//! synchronization pass over a platform integration.

mod sync_model;
mod sync_runner;
mod sync_service;
mod sync_traits;

#[cfg(test)]
mod sync_runner_tests;


// Re-export the public interface
pub use sync_model::{
    NewSyncLog, PlatformMetric, RecentActivityEntry, SyncLog, SyncOutcome, SyncStatus,
};
pub use sync_runner::SyncRunner;
pub use sync_service::SyncLogService;
pub use sync_traits::{
    PlatformConnectorTrait, SyncLogRepositoryTrait, SyncLogServiceTrait, SyncRunnerTrait,
};
