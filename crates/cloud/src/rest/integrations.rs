//! Integration repository over the `integrations` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pulseboard_core::integrations::{
    Integration, IntegrationRepositoryTrait, IntegrationStatus, IntegrationUpdate, NewIntegration,
    Platform, SyncFrequency,
};
use pulseboard_core::Result;

use super::{missing_returned_row, row_not_found};
use crate::client::ApiClient;

/// Row shape of the `integrations` table.
#[derive(Debug, Deserialize)]
struct IntegrationRow {
    id: Uuid,
    user_id: Uuid,
    platform: Platform,
    status: IntegrationStatus,
    api_key: Option<String>,
    store_name: String,
    sync_frequency: SyncFrequency,
    last_sync: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

// Conversion to domain models
impl From<IntegrationRow> for Integration {
    fn from(row: IntegrationRow) -> Self {
        Integration {
            id: row.id,
            user_id: row.user_id,
            platform: row.platform,
            status: row.status,
            api_key: row.api_key,
            store_name: row.store_name,
            sync_frequency: row.sync_frequency,
            last_sync: row.last_sync,
            created_at: row.created_at,
        }
    }
}

/// Insert payload for `integrations`. A freshly connected store starts in
/// the connected state with no sync yet recorded.
#[derive(Debug, Serialize)]
struct NewIntegrationRow<'a> {
    user_id: Uuid,
    platform: Platform,
    status: IntegrationStatus,
    store_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
    sync_frequency: SyncFrequency,
}

impl<'a> NewIntegrationRow<'a> {
    fn from_input(user_id: Uuid, input: &'a NewIntegration) -> Self {
        Self {
            user_id,
            platform: input.platform,
            status: IntegrationStatus::Connected,
            store_name: &input.store_name,
            api_key: input.api_key.as_deref(),
            sync_frequency: input.sync_frequency,
        }
    }
}

/// Patch payload for `integrations`; absent fields leave columns untouched.
#[derive(Debug, Serialize)]
struct IntegrationChanges<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    store_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<IntegrationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sync_frequency: Option<SyncFrequency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_sync: Option<DateTime<Utc>>,
}

impl<'a> IntegrationChanges<'a> {
    fn from_update(update: &'a IntegrationUpdate) -> Self {
        Self {
            store_name: update.store_name.as_deref(),
            api_key: update.api_key.as_deref(),
            status: update.status,
            sync_frequency: update.sync_frequency,
            last_sync: update.last_sync,
        }
    }
}

pub struct IntegrationRepository {
    api: ApiClient,
}

impl IntegrationRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl IntegrationRepositoryTrait for IntegrationRepository {
    async fn list(&self, user_id: Uuid) -> Result<Vec<Integration>> {
        let path = format!(
            "/rest/v1/integrations?select=*&user_id=eq.{}&order=created_at.desc",
            user_id
        );
        let rows: Vec<IntegrationRow> = self.api.get(&path).await?;
        Ok(rows.into_iter().map(Integration::from).collect())
    }

    async fn get_by_id(&self, user_id: Uuid, integration_id: Uuid) -> Result<Integration> {
        let path = format!(
            "/rest/v1/integrations?select=*&id=eq.{}&user_id=eq.{}",
            integration_id, user_id
        );
        let rows: Vec<IntegrationRow> = self.api.get(&path).await?;
        rows.into_iter()
            .next()
            .map(Integration::from)
            .ok_or_else(|| row_not_found("Integration", integration_id))
    }

    async fn create(&self, user_id: Uuid, new_integration: NewIntegration) -> Result<Integration> {
        let row = NewIntegrationRow::from_input(user_id, &new_integration);
        let rows: Vec<IntegrationRow> = self.api.insert("/rest/v1/integrations", &row).await?;
        rows.into_iter()
            .next()
            .map(Integration::from)
            .ok_or_else(|| missing_returned_row("integration"))
    }

    async fn update(
        &self,
        user_id: Uuid,
        integration_id: Uuid,
        update: IntegrationUpdate,
    ) -> Result<Integration> {
        let changes = IntegrationChanges::from_update(&update);
        let path = format!(
            "/rest/v1/integrations?id=eq.{}&user_id=eq.{}",
            integration_id, user_id
        );
        let rows: Vec<IntegrationRow> = self.api.update(&path, &changes).await?;
        rows.into_iter()
            .next()
            .map(Integration::from)
            .ok_or_else(|| row_not_found("Integration", integration_id))
    }

    async fn delete(&self, user_id: Uuid, integration_id: Uuid) -> Result<()> {
        let path = format!(
            "/rest/v1/integrations?id=eq.{}&user_id=eq.{}",
            integration_id, user_id
        );
        self.api.delete(&path).await
    }
}
