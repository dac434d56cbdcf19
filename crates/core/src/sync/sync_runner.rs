//! Runner driving one synchronization pass over a platform integration.

use log::{info, warn};
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::sync_model::{NewSyncLog, SyncOutcome};
use super::sync_traits::{PlatformConnectorTrait, SyncLogRepositoryTrait, SyncRunnerTrait};
use crate::auth::SessionProviderTrait;
use crate::errors::Result;
use crate::integrations::{
    Integration, IntegrationRepositoryTrait, IntegrationStatus, IntegrationUpdate,
};
use crate::kpis::KpiRepositoryTrait;
use crate::Error;

/// Drives synchronization of platform metrics into KPI records.
///
/// Each run appends an `in_progress` log entry, fetches the integration's
/// metrics through the connector, and finishes with exactly one terminal log
/// entry (`success` or `error`). Fetched metrics are upserted by metric name
/// so repeated runs refresh values instead of piling up duplicates.
pub struct SyncRunner {
    integration_repository: Arc<dyn IntegrationRepositoryTrait>,
    kpi_repository: Arc<dyn KpiRepositoryTrait>,
    sync_log_repository: Arc<dyn SyncLogRepositoryTrait>,
    connector: Arc<dyn PlatformConnectorTrait>,
    session: Arc<dyn SessionProviderTrait>,
}

impl SyncRunner {
    pub fn new(
        integration_repository: Arc<dyn IntegrationRepositoryTrait>,
        kpi_repository: Arc<dyn KpiRepositoryTrait>,
        sync_log_repository: Arc<dyn SyncLogRepositoryTrait>,
        connector: Arc<dyn PlatformConnectorTrait>,
        session: Arc<dyn SessionProviderTrait>,
    ) -> Self {
        Self {
            integration_repository,
            kpi_repository,
            sync_log_repository,
            connector,
            session,
        }
    }

    fn current_user_id(&self) -> Result<Uuid> {
        self.session.current_user_id().ok_or(Error::Unauthenticated)
    }

    /// Syncs one loaded integration. The caller has already resolved the
    /// user and the integration row.
    async fn run_integration(
        &self,
        user_id: Uuid,
        integration: &Integration,
    ) -> Result<SyncOutcome> {
        info!(
            "Syncing {} store '{}' ({})",
            integration.platform.display_name(),
            integration.store_name,
            integration.id
        );

        self.sync_log_repository
            .create(user_id, NewSyncLog::in_progress(integration.id))
            .await?;

        let metrics = match self.connector.fetch_metrics(integration).await {
            Ok(metrics) => metrics,
            Err(err) => {
                warn!(
                    "Sync failed for integration {}: {}",
                    integration.id, err
                );
                self.integration_repository
                    .update(
                        user_id,
                        integration.id,
                        IntegrationUpdate {
                            status: Some(IntegrationStatus::Error),
                            ..Default::default()
                        },
                    )
                    .await?;
                self.sync_log_repository
                    .create(
                        user_id,
                        NewSyncLog::error(integration.id, &err.to_string()),
                    )
                    .await?;
                return Err(err);
            }
        };

        let synced_at = Utc::now();

        // Upsert by metric name within the user's existing records
        let existing = self.kpi_repository.list(user_id, None).await?;
        let by_name: HashMap<String, Uuid> = existing
            .into_iter()
            .map(|k| (k.metric_name, k.id))
            .collect();

        let mut metrics_synced = 0;
        for metric in &metrics {
            match by_name.get(&metric.metric_name) {
                Some(kpi_id) => {
                    self.kpi_repository
                        .update(user_id, *kpi_id, metric.to_kpi_update(synced_at))
                        .await?;
                }
                None => {
                    self.kpi_repository
                        .create(user_id, metric.to_new_kpi(synced_at))
                        .await?;
                }
            }
            metrics_synced += 1;
        }

        self.integration_repository
            .update(
                user_id,
                integration.id,
                IntegrationUpdate {
                    status: Some(IntegrationStatus::Connected),
                    last_sync: Some(synced_at),
                    ..Default::default()
                },
            )
            .await?;
        self.sync_log_repository
            .create(user_id, NewSyncLog::success(integration.id))
            .await?;

        info!(
            "Synced {} metric(s) from '{}'",
            metrics_synced, integration.store_name
        );
        Ok(SyncOutcome::succeeded(
            integration.id,
            integration.platform,
            metrics_synced,
        ))
    }
}

#[async_trait]
impl SyncRunnerTrait for SyncRunner {
    async fn run(&self, integration_id: Uuid) -> Result<SyncOutcome> {
        let user_id = self.current_user_id()?;
        let integration = self
            .integration_repository
            .get_by_id(user_id, integration_id)
            .await?;
        self.run_integration(user_id, &integration).await
    }

    async fn run_all(&self) -> Result<Vec<SyncOutcome>> {
        let user_id = self.current_user_id()?;
        let integrations = self.integration_repository.list(user_id).await?;

        let mut outcomes = Vec::with_capacity(integrations.len());
        for integration in &integrations {
            match self.run_integration(user_id, integration).await {
                Ok(outcome) => outcomes.push(outcome),
                Err(err) => outcomes.push(SyncOutcome::failed(
                    integration.id,
                    integration.platform,
                    err.to_string(),
                )),
            }
        }
        Ok(outcomes)
    }
}
