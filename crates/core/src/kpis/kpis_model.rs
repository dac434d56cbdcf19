//! KPI domain models and the pure metric helpers derived from them.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::kpis_constants::{ON_TRACK_RATIO, TREND_THRESHOLD};
use crate::errors::FieldError;
use crate::utils::group_thousands;
use crate::{errors::ValidationError, Error, Result};

/// How a KPI value is denominated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KpiUnit {
    Currency,
    Percentage,
    Count,
    Ratio,
}

impl KpiUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            KpiUnit::Currency => "currency",
            KpiUnit::Percentage => "percentage",
            KpiUnit::Count => "count",
            KpiUnit::Ratio => "ratio",
        }
    }

    /// The symbol shown next to values of this unit.
    pub fn symbol(&self) -> &'static str {
        match self {
            KpiUnit::Currency => "$",
            KpiUnit::Percentage => "%",
            KpiUnit::Count => "",
            KpiUnit::Ratio => ":",
        }
    }
}

impl FromStr for KpiUnit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "currency" => Ok(KpiUnit::Currency),
            "percentage" => Ok(KpiUnit::Percentage),
            "count" => Ok(KpiUnit::Count),
            "ratio" => Ok(KpiUnit::Ratio),
            _ => Err(format!("Unknown KPI unit: {}", s)),
        }
    }
}

/// Direction a metric has been moving, derived from its change percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

impl Trend {
    /// Classifies a change percent. Movement within the threshold on either
    /// side counts as neutral; the comparisons are strict, so a change of
    /// exactly the threshold stays neutral.
    pub fn from_change(change_percent: Decimal) -> Self {
        if change_percent > TREND_THRESHOLD {
            Trend::Up
        } else if change_percent < -TREND_THRESHOLD {
            Trend::Down
        } else {
            Trend::Neutral
        }
    }
}

/// Percentage of target reached, rounded to a whole number.
///
/// A zero target yields zero rather than dividing by it.
pub fn progress(value: Decimal, target: Decimal) -> Decimal {
    if target.is_zero() {
        return Decimal::ZERO;
    }
    (value / target * dec!(100)).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Whether the value has reached the on-track share of its target.
///
/// A zero target is never on track.
pub fn is_on_track(value: Decimal, target: Decimal) -> bool {
    if target.is_zero() {
        return false;
    }
    value / target >= ON_TRACK_RATIO
}

/// Formats a KPI value for display in its unit.
pub fn format_kpi_value(value: Decimal, unit: KpiUnit) -> String {
    let plain = value.normalize().to_string();
    match unit {
        KpiUnit::Currency => format!("${}", group_thousands(&plain)),
        KpiUnit::Percentage => format!("{}%", plain),
        KpiUnit::Ratio => format!("{}:1", plain),
        KpiUnit::Count => group_thousands(&plain),
    }
}

/// Domain model representing one KPI measurement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KpiRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub metric_name: String,
    pub value: Decimal,
    pub target: Decimal,
    pub unit: KpiUnit,
    pub category: String,
    pub change_percent: Decimal,
    pub trend: Trend,
    pub recorded_at: DateTime<Utc>,
}

impl KpiRecord {
    /// Percentage of target reached.
    pub fn progress(&self) -> Decimal {
        progress(self.value, self.target)
    }

    /// Whether this KPI has reached the on-track share of its target.
    pub fn is_on_track(&self) -> bool {
        is_on_track(self.value, self.target)
    }

    /// The value formatted for display in this KPI's unit.
    pub fn formatted_value(&self) -> String {
        format_kpi_value(self.value, self.unit)
    }
}

/// Input model for creating a new KPI.
///
/// Ownership is not part of the input: the service stamps the authenticated
/// user's id when the record is written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewKpi {
    pub metric_name: String,
    pub value: Decimal,
    pub target: Decimal,
    pub unit: KpiUnit,
    pub category: String,
    #[serde(default)]
    pub change_percent: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,
}

impl NewKpi {
    /// The trend derived from the supplied change percent.
    pub fn trend(&self) -> Trend {
        Trend::from_change(self.change_percent)
    }

    /// Validates the new KPI data.
    pub fn validate(&self) -> Result<()> {
        if self.metric_name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Metric name cannot be empty".to_string(),
            )));
        }
        if self.category.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Category cannot be empty".to_string(),
            )));
        }
        Ok(())
    }
}

/// Input model for updating an existing KPI. Absent fields are left as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiUpdate {
    pub metric_name: Option<String>,
    pub value: Option<Decimal>,
    pub target: Option<Decimal>,
    pub unit: Option<KpiUnit>,
    pub category: Option<String>,
    pub change_percent: Option<Decimal>,
    pub recorded_at: Option<DateTime<Utc>>,
}

impl KpiUpdate {
    /// Returns true when the patch carries no changes.
    pub fn is_empty(&self) -> bool {
        self.metric_name.is_none()
            && self.value.is_none()
            && self.target.is_none()
            && self.unit.is_none()
            && self.category.is_none()
            && self.change_percent.is_none()
            && self.recorded_at.is_none()
    }

    /// When the change percent moves, the stored trend moves with it.
    pub fn derived_trend(&self) -> Option<Trend> {
        self.change_percent.map(Trend::from_change)
    }
}

/// Raw form input for a KPI, exactly as a form submits it.
///
/// `validate` either produces the typed insert model or the full list of
/// field-level problems; drafts never reach the data-access layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiDraft {
    pub metric_name: String,
    pub value: String,
    pub target: String,
    pub unit: String,
    pub category: String,
    /// Empty means no change recorded yet.
    #[serde(default)]
    pub change_percent: String,
}

impl KpiDraft {
    /// Validates the draft, collecting every field error rather than
    /// stopping at the first.
    pub fn validate(&self) -> std::result::Result<NewKpi, Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.metric_name.trim().is_empty() {
            errors.push(FieldError::new("metricName", "Metric name is required"));
        }

        let value = match parse_decimal_field(&self.value) {
            ParsedField::Missing => {
                errors.push(FieldError::new("value", "Value is required"));
                None
            }
            ParsedField::Invalid => {
                errors.push(FieldError::new("value", "Value must be a number"));
                None
            }
            ParsedField::Ok(v) => Some(v),
        };

        let target = match parse_decimal_field(&self.target) {
            ParsedField::Missing => {
                errors.push(FieldError::new("target", "Target is required"));
                None
            }
            ParsedField::Invalid => {
                errors.push(FieldError::new("target", "Target must be a number"));
                None
            }
            ParsedField::Ok(v) => Some(v),
        };

        let unit = match KpiUnit::from_str(self.unit.trim()) {
            Ok(u) => Some(u),
            Err(_) => {
                errors.push(FieldError::new(
                    "unit",
                    "Unit must be one of currency, percentage, count, ratio",
                ));
                None
            }
        };

        if self.category.trim().is_empty() {
            errors.push(FieldError::new("category", "Category is required"));
        }

        let change_percent = if self.change_percent.trim().is_empty() {
            Some(Decimal::ZERO)
        } else {
            match Decimal::from_str(self.change_percent.trim()) {
                Ok(v) => Some(v),
                Err(_) => {
                    errors.push(FieldError::new(
                        "changePercent",
                        "Change percent must be a number",
                    ));
                    None
                }
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        // Every None pushed an error above, so these defaults are unreachable.
        Ok(NewKpi {
            metric_name: self.metric_name.trim().to_string(),
            value: value.unwrap_or_default(),
            target: target.unwrap_or_default(),
            unit: unit.unwrap_or(KpiUnit::Count),
            category: self.category.trim().to_string(),
            change_percent: change_percent.unwrap_or_default(),
            recorded_at: None,
        })
    }
}

enum ParsedField {
    Missing,
    Invalid,
    Ok(Decimal),
}

fn parse_decimal_field(raw: &str) -> ParsedField {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return ParsedField::Missing;
    }
    match Decimal::from_str(trimmed) {
        Ok(v) => ParsedField::Ok(v),
        Err(_) => ParsedField::Invalid,
    }
}

/// Aggregate view of a user's KPIs for the dashboard header cards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KpiSummary {
    pub total_kpis: usize,
    pub on_track_kpis: usize,
    pub average_progress: Decimal,
    pub trends_up: usize,
    pub trends_down: usize,
}

impl KpiSummary {
    /// Computes the summary over a set of KPI records.
    ///
    /// Zero-target records contribute zero progress instead of poisoning the
    /// average.
    pub fn from_records(records: &[KpiRecord]) -> Self {
        let total_kpis = records.len();
        let on_track_kpis = records.iter().filter(|k| k.is_on_track()).count();
        let average_progress = if records.is_empty() {
            Decimal::ZERO
        } else {
            let sum: Decimal = records.iter().map(|k| k.progress()).sum();
            (sum / Decimal::from(total_kpis as u64))
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        };
        let trends_up = records.iter().filter(|k| k.trend == Trend::Up).count();
        let trends_down = records.iter().filter(|k| k.trend == Trend::Down).count();

        Self {
            total_kpis,
            on_track_kpis,
            average_progress,
            trends_up,
            trends_down,
        }
    }
}
