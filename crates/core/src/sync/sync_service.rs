use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::sync_model::{NewSyncLog, RecentActivityEntry, SyncLog};
use super::sync_traits::{SyncLogRepositoryTrait, SyncLogServiceTrait};
use crate::auth::SessionProviderTrait;
use crate::constants::DEFAULT_SYNC_LOG_LIMIT;
use crate::errors::Result;
use crate::integrations::{Integration, IntegrationRepositoryTrait};
use crate::Error;

/// Service for reading and appending sync logs.
pub struct SyncLogService {
    repository: Arc<dyn SyncLogRepositoryTrait>,
    integration_repository: Arc<dyn IntegrationRepositoryTrait>,
    session: Arc<dyn SessionProviderTrait>,
}

impl SyncLogService {
    /// Creates a new SyncLogService instance
    pub fn new(
        repository: Arc<dyn SyncLogRepositoryTrait>,
        integration_repository: Arc<dyn IntegrationRepositoryTrait>,
        session: Arc<dyn SessionProviderTrait>,
    ) -> Self {
        Self {
            repository,
            integration_repository,
            session,
        }
    }

    fn current_user_id(&self) -> Result<Uuid> {
        self.session.current_user_id().ok_or(Error::Unauthenticated)
    }
}

#[async_trait]
impl SyncLogServiceTrait for SyncLogService {
    async fn get_sync_logs(&self, limit: Option<i64>) -> Result<Vec<SyncLog>> {
        let user_id = self.current_user_id()?;
        self.repository
            .list(user_id, limit.unwrap_or(DEFAULT_SYNC_LOG_LIMIT))
            .await
    }

    async fn record_log(&self, new_log: NewSyncLog) -> Result<SyncLog> {
        let user_id = self.current_user_id()?;
        self.repository.create(user_id, new_log).await
    }

    /// Stitches each log entry with its integration's platform and store
    /// name. The log table only stores the integration id, so the join
    /// happens here.
    async fn recent_activity(&self, limit: i64) -> Result<Vec<RecentActivityEntry>> {
        let user_id = self.current_user_id()?;
        let logs = self.repository.list(user_id, limit).await?;
        let integrations = self.integration_repository.list(user_id).await?;
        let by_id: HashMap<Uuid, &Integration> =
            integrations.iter().map(|i| (i.id, i)).collect();

        Ok(logs
            .into_iter()
            .map(|log| {
                let integration = by_id.get(&log.integration_id);
                RecentActivityEntry {
                    platform: integration.map(|i| i.platform),
                    store_name: integration.map(|i| i.store_name.clone()),
                    log,
                }
            })
            .collect())
    }
}
