//! Sync log repository over the `sync_logs` table.
//!
//! The log is append-only; the repository exposes list and create, nothing
//! else, matching the core trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pulseboard_core::sync::{NewSyncLog, SyncLog, SyncLogRepositoryTrait, SyncStatus};
use pulseboard_core::Result;

use super::missing_returned_row;
use crate::client::ApiClient;

/// Row shape of the `sync_logs` table.
#[derive(Debug, Deserialize)]
struct SyncLogRow {
    id: Uuid,
    user_id: Uuid,
    integration_id: Uuid,
    status: SyncStatus,
    error_message: Option<String>,
    synced_at: DateTime<Utc>,
}

// Conversion to domain models
impl From<SyncLogRow> for SyncLog {
    fn from(row: SyncLogRow) -> Self {
        SyncLog {
            id: row.id,
            user_id: row.user_id,
            integration_id: row.integration_id,
            status: row.status,
            error_message: row.error_message,
            synced_at: row.synced_at,
        }
    }
}

/// Insert payload for `sync_logs`; `synced_at` defaults to now on the
/// backend.
#[derive(Debug, Serialize)]
struct NewSyncLogRow<'a> {
    user_id: Uuid,
    integration_id: Uuid,
    status: SyncStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_message: Option<&'a str>,
}

impl<'a> NewSyncLogRow<'a> {
    fn from_input(user_id: Uuid, input: &'a NewSyncLog) -> Self {
        Self {
            user_id,
            integration_id: input.integration_id,
            status: input.status,
            error_message: input.error_message.as_deref(),
        }
    }
}

pub struct SyncLogRepository {
    api: ApiClient,
}

impl SyncLogRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl SyncLogRepositoryTrait for SyncLogRepository {
    async fn list(&self, user_id: Uuid, limit: i64) -> Result<Vec<SyncLog>> {
        let path = format!(
            "/rest/v1/sync_logs?select=*&user_id=eq.{}&order=synced_at.desc&limit={}",
            user_id, limit
        );
        let rows: Vec<SyncLogRow> = self.api.get(&path).await?;
        Ok(rows.into_iter().map(SyncLog::from).collect())
    }

    async fn create(&self, user_id: Uuid, new_log: NewSyncLog) -> Result<SyncLog> {
        let row = NewSyncLogRow::from_input(user_id, &new_log);
        let rows: Vec<SyncLogRow> = self.api.insert("/rest/v1/sync_logs", &row).await?;
        rows.into_iter()
            .next()
            .map(SyncLog::from)
            .ok_or_else(|| missing_returned_row("sync log"))
    }
}
