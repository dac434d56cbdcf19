//! KPI repository over the `kpi_data` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pulseboard_core::kpis::{KpiRecord, KpiRepositoryTrait, KpiUnit, KpiUpdate, NewKpi, Trend};
use pulseboard_core::Result;

use super::{missing_returned_row, row_not_found};
use crate::client::ApiClient;

/// Row shape of the `kpi_data` table.
#[derive(Debug, Deserialize)]
struct KpiRow {
    id: Uuid,
    user_id: Uuid,
    metric_name: String,
    value: Decimal,
    target: Decimal,
    unit: KpiUnit,
    category: String,
    change_percent: Decimal,
    trend: Trend,
    recorded_at: DateTime<Utc>,
}

// Conversion to domain models
impl From<KpiRow> for KpiRecord {
    fn from(row: KpiRow) -> Self {
        KpiRecord {
            id: row.id,
            user_id: row.user_id,
            metric_name: row.metric_name,
            value: row.value,
            target: row.target,
            unit: row.unit,
            category: row.category,
            change_percent: row.change_percent,
            trend: row.trend,
            recorded_at: row.recorded_at,
        }
    }
}

/// Insert payload for `kpi_data`; the backend fills `id` and defaults
/// `recorded_at` when it is not supplied.
#[derive(Debug, Serialize)]
struct NewKpiRow<'a> {
    user_id: Uuid,
    metric_name: &'a str,
    value: Decimal,
    target: Decimal,
    unit: KpiUnit,
    category: &'a str,
    change_percent: Decimal,
    trend: Trend,
    #[serde(skip_serializing_if = "Option::is_none")]
    recorded_at: Option<DateTime<Utc>>,
}

impl<'a> NewKpiRow<'a> {
    fn from_input(user_id: Uuid, input: &'a NewKpi) -> Self {
        Self {
            user_id,
            metric_name: &input.metric_name,
            value: input.value,
            target: input.target,
            unit: input.unit,
            category: &input.category,
            change_percent: input.change_percent,
            trend: input.trend(),
            recorded_at: input.recorded_at,
        }
    }
}

/// Patch payload for `kpi_data`; absent fields leave columns untouched.
/// The trend column follows the change percent whenever it moves.
#[derive(Debug, Serialize)]
struct KpiChanges<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    metric_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unit: Option<KpiUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    change_percent: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trend: Option<Trend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recorded_at: Option<DateTime<Utc>>,
}

impl<'a> KpiChanges<'a> {
    fn from_update(update: &'a KpiUpdate) -> Self {
        Self {
            metric_name: update.metric_name.as_deref(),
            value: update.value,
            target: update.target,
            unit: update.unit,
            category: update.category.as_deref(),
            change_percent: update.change_percent,
            trend: update.derived_trend(),
            recorded_at: update.recorded_at,
        }
    }
}

pub struct KpiRepository {
    api: ApiClient,
}

impl KpiRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl KpiRepositoryTrait for KpiRepository {
    async fn list(&self, user_id: Uuid, limit: Option<i64>) -> Result<Vec<KpiRecord>> {
        let mut path = format!(
            "/rest/v1/kpi_data?select=*&user_id=eq.{}&order=recorded_at.desc",
            user_id
        );
        if let Some(limit) = limit {
            path.push_str(&format!("&limit={}", limit));
        }
        let rows: Vec<KpiRow> = self.api.get(&path).await?;
        Ok(rows.into_iter().map(KpiRecord::from).collect())
    }

    async fn list_by_category(&self, user_id: Uuid, category: &str) -> Result<Vec<KpiRecord>> {
        let path = format!(
            "/rest/v1/kpi_data?select=*&user_id=eq.{}&category=eq.{}&order=recorded_at.desc",
            user_id,
            urlencoding::encode(category)
        );
        let rows: Vec<KpiRow> = self.api.get(&path).await?;
        Ok(rows.into_iter().map(KpiRecord::from).collect())
    }

    async fn get_by_id(&self, user_id: Uuid, kpi_id: Uuid) -> Result<KpiRecord> {
        let path = format!(
            "/rest/v1/kpi_data?select=*&id=eq.{}&user_id=eq.{}",
            kpi_id, user_id
        );
        let rows: Vec<KpiRow> = self.api.get(&path).await?;
        rows.into_iter()
            .next()
            .map(KpiRecord::from)
            .ok_or_else(|| row_not_found("KPI", kpi_id))
    }

    async fn create(&self, user_id: Uuid, new_kpi: NewKpi) -> Result<KpiRecord> {
        let row = NewKpiRow::from_input(user_id, &new_kpi);
        let rows: Vec<KpiRow> = self.api.insert("/rest/v1/kpi_data", &row).await?;
        rows.into_iter()
            .next()
            .map(KpiRecord::from)
            .ok_or_else(|| missing_returned_row("KPI"))
    }

    async fn update(&self, user_id: Uuid, kpi_id: Uuid, update: KpiUpdate) -> Result<KpiRecord> {
        let changes = KpiChanges::from_update(&update);
        let path = format!("/rest/v1/kpi_data?id=eq.{}&user_id=eq.{}", kpi_id, user_id);
        let rows: Vec<KpiRow> = self.api.update(&path, &changes).await?;
        rows.into_iter()
            .next()
            .map(KpiRecord::from)
            .ok_or_else(|| row_not_found("KPI", kpi_id))
    }

    async fn delete(&self, user_id: Uuid, kpi_id: Uuid) -> Result<()> {
        let path = format!("/rest/v1/kpi_data?id=eq.{}&user_id=eq.{}", kpi_id, user_id);
        self.api.delete(&path).await
    }
}
