//! Change payload types delivered by the realtime transport.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::integrations::Integration;
use crate::kpis::KpiRecord;
use crate::sync::SyncLog;

/// The entity types a channel can watch. One channel per kind, never one
/// per record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    KpiData,
    Integrations,
    SyncLogs,
}

impl EntityKind {
    /// The backend table this kind maps to.
    pub fn table(&self) -> &'static str {
        match self {
            EntityKind::KpiData => "kpi_data",
            EntityKind::Integrations => "integrations",
            EntityKind::SyncLogs => "sync_logs",
        }
    }

    /// The channel name used on the wire.
    pub fn channel(&self) -> &'static str {
        match self {
            EntityKind::KpiData => "kpi_data_changes",
            EntityKind::Integrations => "integration_changes",
            EntityKind::SyncLogs => "sync_log_changes",
        }
    }
}

/// What happened to the row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// One change event as the transport hands it over, rows still untyped.
///
/// `new` carries the row after the change (inserts and updates); `old`
/// carries the row before it (updates and deletes). Either may be absent
/// depending on what the backend publishes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawChange {
    pub event_type: ChangeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old: Option<serde_json::Value>,
}

impl RawChange {
    /// Creates an insert event carrying the new row.
    pub fn insert(new: serde_json::Value) -> Self {
        Self {
            event_type: ChangeKind::Insert,
            new: Some(new),
            old: None,
        }
    }

    /// Creates an update event carrying both row images.
    pub fn update(new: serde_json::Value, old: Option<serde_json::Value>) -> Self {
        Self {
            event_type: ChangeKind::Update,
            new: Some(new),
            old,
        }
    }

    /// Creates a delete event carrying the removed row.
    pub fn delete(old: serde_json::Value) -> Self {
        Self {
            event_type: ChangeKind::Delete,
            new: None,
            old: Some(old),
        }
    }
}

/// Binds a record type to the entity kind whose channel delivers it.
pub trait TableRecord: DeserializeOwned + Send + 'static {
    const KIND: EntityKind;
}

impl TableRecord for KpiRecord {
    const KIND: EntityKind = EntityKind::KpiData;
}

impl TableRecord for Integration {
    const KIND: EntityKind = EntityKind::Integrations;
}

impl TableRecord for SyncLog {
    const KIND: EntityKind = EntityKind::SyncLogs;
}
