use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};

/// Reporting period for dashboard queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Week,
    Month,
    Quarter,
    Year,
}

impl Period {
    /// Returns the `(start, end)` instants covered by this period, ending at
    /// `now`.
    ///
    /// # Arguments
    /// * `now` - The end of the range, usually the current time
    pub fn date_range(&self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = match self {
            Period::Week => now - chrono::Duration::days(7),
            Period::Month => now.checked_sub_months(Months::new(1)).unwrap_or(now),
            Period::Quarter => now.checked_sub_months(Months::new(3)).unwrap_or(now),
            Period::Year => now.checked_sub_months(Months::new(12)).unwrap_or(now),
        };
        (start, now)
    }

    /// Convenience wrapper using the current time as the end of the range.
    pub fn date_range_now(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        self.date_range(Utc::now())
    }
}

/// Formats how long ago `then` was, relative to `now`.
///
/// Under a minute reads "Just now"; up to a day uses minute/hour buckets;
/// up to a week uses day buckets; anything older falls back to the date.
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - then).num_minutes();
    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return format!("{}m ago", minutes);
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h ago", hours);
    }
    let days = hours / 24;
    if days < 7 {
        return format!("{}d ago", days);
    }
    then.format("%Y-%m-%d").to_string()
}

/// Convenience wrapper using the current time.
pub fn relative_time_now(then: DateTime<Utc>) -> String {
    relative_time(then, Utc::now())
}
