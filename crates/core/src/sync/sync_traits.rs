//! Sync repository, service, connector, and runner traits.

use async_trait::async_trait;
use uuid::Uuid;

use super::sync_model::{NewSyncLog, PlatformMetric, RecentActivityEntry, SyncLog, SyncOutcome};
use crate::errors::Result;
use crate::integrations::Integration;

/// Trait defining the contract for sync log repository operations.
///
/// The log is append-only: there is no update or delete.
#[async_trait]
pub trait SyncLogRepositoryTrait: Send + Sync {
    /// Lists the user's sync logs newest-first, capped at `limit` rows.
    async fn list(&self, user_id: Uuid, limit: i64) -> Result<Vec<SyncLog>>;

    /// Appends a log entry owned by `user_id`.
    async fn create(&self, user_id: Uuid, new_log: NewSyncLog) -> Result<SyncLog>;
}

/// Trait defining the contract for sync log service operations.
#[async_trait]
pub trait SyncLogServiceTrait: Send + Sync {
    /// Gets the caller's sync history, newest-first. `None` falls back to
    /// the default page size.
    async fn get_sync_logs(&self, limit: Option<i64>) -> Result<Vec<SyncLog>>;

    /// Appends a log entry for the caller.
    async fn record_log(&self, new_log: NewSyncLog) -> Result<SyncLog>;

    /// Gets the caller's recent sync history with each entry's integration
    /// stitched in for display.
    async fn recent_activity(&self, limit: i64) -> Result<Vec<RecentActivityEntry>>;
}

/// Client for one e-commerce platform's metrics API.
///
/// Implementations live outside this crate; the runner only needs the
/// fetched metrics.
#[async_trait]
pub trait PlatformConnectorTrait: Send + Sync {
    /// Fetches the current metrics for the given integration's store.
    async fn fetch_metrics(&self, integration: &Integration) -> Result<Vec<PlatformMetric>>;
}

/// Trait defining the contract for running synchronization passes.
#[async_trait]
pub trait SyncRunnerTrait: Send + Sync {
    /// Syncs one integration: fetches its metrics, upserts them as KPI
    /// records, and writes the audit trail.
    async fn run(&self, integration_id: Uuid) -> Result<SyncOutcome>;

    /// Syncs every integration of the caller. One integration failing does
    /// not stop the rest; each outcome reports its own status.
    async fn run_all(&self) -> Result<Vec<SyncOutcome>>;
}
