use serde::{Deserialize, Serialize};

use crate::integrations::Integration;
use crate::kpis::{KpiRecord, KpiSummary};
use crate::sync::RecentActivityEntry;

/// Everything the dashboard screen renders, assembled in one call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    /// Aggregate numbers across all of the user's KPIs.
    pub summary: KpiSummary,
    /// The most recently recorded KPIs.
    pub recent_kpis: Vec<KpiRecord>,
    /// Every connected platform, with health derivable per row.
    pub integrations: Vec<Integration>,
    /// The latest sync log entries with their integration stitched in.
    pub recent_activity: Vec<RecentActivityEntry>,
}
