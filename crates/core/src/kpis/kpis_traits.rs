//! KPI repository and service traits.
//!
//! These traits define the contract for KPI operations without any
//! transport-specific types, allowing for different backend implementations.

use async_trait::async_trait;
use uuid::Uuid;

use super::kpis_model::{KpiRecord, KpiSummary, KpiUpdate, NewKpi};
use crate::errors::Result;

/// Trait defining the contract for KPI repository operations.
///
/// Every method is scoped to one user; implementations must filter reads and
/// writes by `user_id` so one user's rows are never visible to another.
#[async_trait]
pub trait KpiRepositoryTrait: Send + Sync {
    /// Lists KPIs newest-first, optionally capped at `limit` rows.
    async fn list(&self, user_id: Uuid, limit: Option<i64>) -> Result<Vec<KpiRecord>>;

    /// Lists the KPIs of one category, newest-first.
    async fn list_by_category(&self, user_id: Uuid, category: &str) -> Result<Vec<KpiRecord>>;

    /// Retrieves a single KPI by its id.
    async fn get_by_id(&self, user_id: Uuid, kpi_id: Uuid) -> Result<KpiRecord>;

    /// Creates a new KPI owned by `user_id`.
    async fn create(&self, user_id: Uuid, new_kpi: NewKpi) -> Result<KpiRecord>;

    /// Applies a partial update to an existing KPI.
    async fn update(&self, user_id: Uuid, kpi_id: Uuid, update: KpiUpdate) -> Result<KpiRecord>;

    /// Deletes a KPI by its id.
    async fn delete(&self, user_id: Uuid, kpi_id: Uuid) -> Result<()>;
}

/// Trait defining the contract for KPI service operations.
///
/// The service layer resolves the authenticated user and fails fast when
/// there is none; no repository call happens for an unauthenticated caller.
#[async_trait]
pub trait KpiServiceTrait: Send + Sync {
    /// Gets all of the caller's KPIs, newest-first.
    async fn get_kpis(&self) -> Result<Vec<KpiRecord>>;

    /// Gets the caller's most recent KPIs.
    async fn get_recent_kpis(&self, limit: i64) -> Result<Vec<KpiRecord>>;

    /// Gets the caller's KPIs in one category.
    async fn get_kpis_by_category(&self, category: &str) -> Result<Vec<KpiRecord>>;

    /// Gets a single KPI by id.
    async fn get_kpi(&self, kpi_id: Uuid) -> Result<KpiRecord>;

    /// Creates a new KPI with business validation.
    async fn create_kpi(&self, new_kpi: NewKpi) -> Result<KpiRecord>;

    /// Applies a partial update to a KPI.
    async fn update_kpi(&self, kpi_id: Uuid, update: KpiUpdate) -> Result<KpiRecord>;

    /// Deletes a KPI.
    async fn delete_kpi(&self, kpi_id: Uuid) -> Result<()>;

    /// Computes the dashboard summary over all of the caller's KPIs.
    async fn get_summary(&self) -> Result<KpiSummary>;
}
