use log::debug;
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::kpis_model::{KpiRecord, KpiSummary, KpiUpdate, NewKpi};
use super::kpis_traits::{KpiRepositoryTrait, KpiServiceTrait};
use crate::auth::SessionProviderTrait;
use crate::errors::Result;
use crate::Error;

/// Service for managing KPI records.
pub struct KpiService {
    repository: Arc<dyn KpiRepositoryTrait>,
    session: Arc<dyn SessionProviderTrait>,
}

impl KpiService {
    /// Creates a new KpiService instance
    pub fn new(
        repository: Arc<dyn KpiRepositoryTrait>,
        session: Arc<dyn SessionProviderTrait>,
    ) -> Self {
        Self {
            repository,
            session,
        }
    }

    fn current_user_id(&self) -> Result<Uuid> {
        self.session.current_user_id().ok_or(Error::Unauthenticated)
    }
}

#[async_trait]
impl KpiServiceTrait for KpiService {
    async fn get_kpis(&self) -> Result<Vec<KpiRecord>> {
        let user_id = self.current_user_id()?;
        self.repository.list(user_id, None).await
    }

    async fn get_recent_kpis(&self, limit: i64) -> Result<Vec<KpiRecord>> {
        let user_id = self.current_user_id()?;
        self.repository.list(user_id, Some(limit)).await
    }

    async fn get_kpis_by_category(&self, category: &str) -> Result<Vec<KpiRecord>> {
        let user_id = self.current_user_id()?;
        self.repository.list_by_category(user_id, category).await
    }

    async fn get_kpi(&self, kpi_id: Uuid) -> Result<KpiRecord> {
        let user_id = self.current_user_id()?;
        self.repository.get_by_id(user_id, kpi_id).await
    }

    /// Creates a new KPI after validating the input.
    async fn create_kpi(&self, new_kpi: NewKpi) -> Result<KpiRecord> {
        let user_id = self.current_user_id()?;
        new_kpi.validate()?;
        debug!(
            "Creating KPI '{}' in category '{}' for user {}",
            new_kpi.metric_name, new_kpi.category, user_id
        );
        self.repository.create(user_id, new_kpi).await
    }

    async fn update_kpi(&self, kpi_id: Uuid, update: KpiUpdate) -> Result<KpiRecord> {
        let user_id = self.current_user_id()?;
        if update.is_empty() {
            debug!("Empty KPI update for {}, returning current record", kpi_id);
            return self.repository.get_by_id(user_id, kpi_id).await;
        }
        self.repository.update(user_id, kpi_id, update).await
    }

    async fn delete_kpi(&self, kpi_id: Uuid) -> Result<()> {
        let user_id = self.current_user_id()?;
        debug!("Deleting KPI {} for user {}", kpi_id, user_id);
        self.repository.delete(user_id, kpi_id).await
    }

    /// Computes the dashboard summary over all of the caller's KPIs.
    async fn get_summary(&self) -> Result<KpiSummary> {
        let records = self.get_kpis().await?;
        Ok(KpiSummary::from_records(&records))
    }
}
