//! Sync log domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::integrations::Platform;
use crate::kpis::{KpiUnit, KpiUpdate, NewKpi, Trend};

/// Outcome of one synchronization attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    Success,
    Error,
    InProgress,
}

impl SyncStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncStatus::Success => "success",
            SyncStatus::Error => "error",
            SyncStatus::InProgress => "in_progress",
        }
    }
}

/// Domain model representing one entry in an integration's sync history.
///
/// Logs are append-only: they are inserted and read, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SyncLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub integration_id: Uuid,
    pub status: SyncStatus,
    pub error_message: Option<String>,
    pub synced_at: DateTime<Utc>,
}

/// Input model for appending a sync log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSyncLog {
    pub integration_id: Uuid,
    pub status: SyncStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl NewSyncLog {
    pub fn in_progress(integration_id: Uuid) -> Self {
        Self {
            integration_id,
            status: SyncStatus::InProgress,
            error_message: None,
        }
    }

    pub fn success(integration_id: Uuid) -> Self {
        Self {
            integration_id,
            status: SyncStatus::Success,
            error_message: None,
        }
    }

    pub fn error(integration_id: Uuid, message: &str) -> Self {
        Self {
            integration_id,
            status: SyncStatus::Error,
            error_message: Some(message.to_string()),
        }
    }
}

/// A sync log entry stitched with its integration for display, since the
/// log row itself only carries the integration's id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivityEntry {
    pub log: SyncLog,
    /// Absent when the integration has since been deleted.
    pub platform: Option<Platform>,
    pub store_name: Option<String>,
}

/// One metric as fetched from an e-commerce platform's API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformMetric {
    pub metric_name: String,
    pub value: Decimal,
    pub target: Decimal,
    pub unit: KpiUnit,
    pub category: String,
    #[serde(default)]
    pub change_percent: Decimal,
}

impl PlatformMetric {
    /// Builds the insert model for a metric seen for the first time.
    pub fn to_new_kpi(&self, recorded_at: DateTime<Utc>) -> NewKpi {
        NewKpi {
            metric_name: self.metric_name.clone(),
            value: self.value,
            target: self.target,
            unit: self.unit,
            category: self.category.clone(),
            change_percent: self.change_percent,
            recorded_at: Some(recorded_at),
        }
    }

    /// Builds the patch for a metric that already has a KPI record.
    pub fn to_kpi_update(&self, recorded_at: DateTime<Utc>) -> KpiUpdate {
        KpiUpdate {
            metric_name: None,
            value: Some(self.value),
            target: Some(self.target),
            unit: Some(self.unit),
            category: Some(self.category.clone()),
            change_percent: Some(self.change_percent),
            recorded_at: Some(recorded_at),
        }
    }

    /// The trend the synced change percent implies.
    pub fn trend(&self) -> Trend {
        Trend::from_change(self.change_percent)
    }
}

/// Result of syncing one integration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SyncOutcome {
    pub integration_id: Uuid,
    pub platform: Platform,
    pub metrics_synced: usize,
    pub status: SyncStatus,
    pub error_message: Option<String>,
}

impl SyncOutcome {
    pub fn succeeded(integration_id: Uuid, platform: Platform, metrics_synced: usize) -> Self {
        Self {
            integration_id,
            platform,
            metrics_synced,
            status: SyncStatus::Success,
            error_message: None,
        }
    }

    pub fn failed(integration_id: Uuid, platform: Platform, message: String) -> Self {
        Self {
            integration_id,
            platform,
            metrics_synced: 0,
            status: SyncStatus::Error,
            error_message: Some(message),
        }
    }
}
