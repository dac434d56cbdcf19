use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::dashboard_model::DashboardData;
use super::dashboard_traits::DashboardServiceTrait;
use crate::constants::{DASHBOARD_RECENT_KPIS, DASHBOARD_RECENT_SYNC_LOGS};
use crate::errors::Result;
use crate::integrations::IntegrationServiceTrait;
use crate::kpis::KpiServiceTrait;
use crate::sync::SyncLogServiceTrait;

/// Service for assembling the dashboard overview from the domain services.
///
/// Authorization lives in the underlying services; each section is already
/// scoped to the current user by the service that produced it.
pub struct DashboardService {
    kpi_service: Arc<dyn KpiServiceTrait>,
    integration_service: Arc<dyn IntegrationServiceTrait>,
    sync_log_service: Arc<dyn SyncLogServiceTrait>,
}

impl DashboardService {
    /// Creates a new DashboardService instance
    pub fn new(
        kpi_service: Arc<dyn KpiServiceTrait>,
        integration_service: Arc<dyn IntegrationServiceTrait>,
        sync_log_service: Arc<dyn SyncLogServiceTrait>,
    ) -> Self {
        Self {
            kpi_service,
            integration_service,
            sync_log_service,
        }
    }
}

#[async_trait]
impl DashboardServiceTrait for DashboardService {
    async fn overview(&self) -> Result<DashboardData> {
        debug!("Assembling dashboard overview");

        // The four sections are independent reads, so fetch them together.
        let (summary, recent_kpis, integrations, recent_activity) = futures::try_join!(
            self.kpi_service.get_summary(),
            self.kpi_service.get_recent_kpis(DASHBOARD_RECENT_KPIS),
            self.integration_service.get_integrations(),
            self.sync_log_service.recent_activity(DASHBOARD_RECENT_SYNC_LOGS),
        )?;

        Ok(DashboardData {
            summary,
            recent_kpis,
            integrations,
            recent_activity,
        })
    }
}
