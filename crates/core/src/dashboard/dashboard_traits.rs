use async_trait::async_trait;

use super::dashboard_model::DashboardData;
use crate::errors::Result;

/// Trait defining the contract for dashboard assembly.
#[async_trait]
pub trait DashboardServiceTrait: Send + Sync {
    /// Fetches every section of the dashboard for the current user.
    async fn overview(&self) -> Result<DashboardData>;
}
