/// Hours a realtime integration may go without a sync before it counts as
/// unhealthy.
pub const HEALTH_THRESHOLD_REALTIME_HOURS: i64 = 1;

/// Hours an hourly integration may go without a sync.
pub const HEALTH_THRESHOLD_HOURLY_HOURS: i64 = 2;

/// Hours a daily integration may go without a sync. One day plus an hour of
/// scheduler slack.
pub const HEALTH_THRESHOLD_DAILY_HOURS: i64 = 25;

/// Hours a weekly integration may go without a sync.
pub const HEALTH_THRESHOLD_WEEKLY_HOURS: i64 = 168;
