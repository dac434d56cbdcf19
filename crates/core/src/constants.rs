/// Number of recent KPI rows shown on the dashboard
pub const DASHBOARD_RECENT_KPIS: i64 = 10;

/// Number of recent sync log rows shown on the dashboard
pub const DASHBOARD_RECENT_SYNC_LOGS: i64 = 10;

/// Default page size for sync log queries
pub const DEFAULT_SYNC_LOG_LIMIT: i64 = 50;
