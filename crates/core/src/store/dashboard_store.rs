use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::integrations::Integration;
use crate::kpis::{is_on_track, progress, KpiRecord, KpiUnit, Trend, DEFAULT_CATEGORIES};
use crate::profiles::{Profile, ProfileUpdate};

/// One display-history point: a period label and the value recorded for it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KpiSample {
    pub date: String,
    pub value: Decimal,
}

/// A KPI as the dashboard holds it, with display-only extras (`tags`,
/// `history`) the backend row does not carry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoreKpi {
    pub id: Uuid,
    pub metric_name: String,
    pub value: Decimal,
    pub target: Decimal,
    pub unit: KpiUnit,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub trend: Trend,
    pub change_percent: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub history: Vec<KpiSample>,
}

impl StoreKpi {
    /// Progress toward target, same rule as the backing record.
    pub fn progress(&self) -> Decimal {
        progress(self.value, self.target)
    }

    pub fn is_on_track(&self) -> bool {
        is_on_track(self.value, self.target)
    }
}

impl From<KpiRecord> for StoreKpi {
    fn from(record: KpiRecord) -> Self {
        Self {
            id: record.id,
            metric_name: record.metric_name,
            value: record.value,
            target: record.target,
            unit: record.unit,
            category: record.category,
            tags: Vec::new(),
            trend: record.trend,
            change_percent: record.change_percent,
            created_at: record.recorded_at,
            updated_at: record.recorded_at,
            history: Vec::new(),
        }
    }
}

/// Input for adding a KPI directly to the store. Identifier and timestamps
/// are assigned on insert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewStoreKpi {
    pub metric_name: String,
    pub value: Decimal,
    pub target: Decimal,
    pub unit: KpiUnit,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub trend: Trend,
    #[serde(default)]
    pub change_percent: Decimal,
    #[serde(default)]
    pub history: Vec<KpiSample>,
}

/// Partial update merged into a stored KPI. `None` fields stay untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoreKpiUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<KpiUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_percent: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<KpiSample>>,
}

/// Client-side dashboard state.
///
/// Mutations are synchronous, last-writer-wins, and run on one execution
/// context; the store itself carries no locking. Create one per session and
/// pass it where it is needed rather than reaching for a global.
#[derive(Debug, Clone)]
pub struct DashboardStore {
    user: Option<Profile>,
    kpis: Vec<StoreKpi>,
    integrations: Vec<Integration>,
    categories: Vec<String>,
    is_loading: bool,
    error: Option<String>,
}

impl DashboardStore {
    /// Creates a store seeded with the default category set.
    pub fn new() -> Self {
        Self {
            user: None,
            kpis: Vec::new(),
            integrations: Vec::new(),
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            is_loading: false,
            error: None,
        }
    }

    /// Adds a KPI, assigning a fresh id and creation/update timestamps. The
    /// KPI's category is registered if it was unknown.
    pub fn add_kpi(&mut self, new_kpi: NewStoreKpi) -> &StoreKpi {
        self.add_category(&new_kpi.category);
        let now = Utc::now();
        let kpi = StoreKpi {
            id: Uuid::new_v4(),
            metric_name: new_kpi.metric_name,
            value: new_kpi.value,
            target: new_kpi.target,
            unit: new_kpi.unit,
            category: new_kpi.category,
            tags: new_kpi.tags,
            trend: new_kpi.trend,
            change_percent: new_kpi.change_percent,
            created_at: now,
            updated_at: now,
            history: new_kpi.history,
        };
        let index = self.kpis.len();
        self.kpis.push(kpi);
        &self.kpis[index]
    }

    /// Merges a partial update into the KPI with `id` and refreshes its
    /// update timestamp; a novel category in the patch is registered.
    /// Returns false, changing nothing, when the id is unknown.
    pub fn update_kpi(&mut self, id: Uuid, update: StoreKpiUpdate) -> bool {
        let novel_category = update.category.clone();
        let Some(kpi) = self.kpis.iter_mut().find(|k| k.id == id) else {
            return false;
        };
        if let Some(metric_name) = update.metric_name {
            kpi.metric_name = metric_name;
        }
        if let Some(value) = update.value {
            kpi.value = value;
        }
        if let Some(target) = update.target {
            kpi.target = target;
        }
        if let Some(unit) = update.unit {
            kpi.unit = unit;
        }
        if let Some(category) = update.category {
            kpi.category = category;
        }
        if let Some(tags) = update.tags {
            kpi.tags = tags;
        }
        if let Some(trend) = update.trend {
            kpi.trend = trend;
        }
        if let Some(change_percent) = update.change_percent {
            kpi.change_percent = change_percent;
        }
        if let Some(history) = update.history {
            kpi.history = history;
        }
        kpi.updated_at = Utc::now();

        if let Some(category) = novel_category {
            self.add_category(&category);
        }
        true
    }

    /// Removes the KPI with `id`. Returns false, changing nothing, when the
    /// id is unknown.
    pub fn delete_kpi(&mut self, id: Uuid) -> bool {
        let before = self.kpis.len();
        self.kpis.retain(|k| k.id != id);
        self.kpis.len() != before
    }

    /// Merges present fields into the signed-in user's profile. No-op when
    /// no user is loaded.
    pub fn update_user(&mut self, update: ProfileUpdate) {
        if let Some(user) = &mut self.user {
            if let Some(first_name) = update.first_name {
                user.first_name = first_name;
            }
            if let Some(last_name) = update.last_name {
                user.last_name = last_name;
            }
            if let Some(email) = update.email {
                user.email = email;
            }
            if let Some(avatar_url) = update.avatar_url {
                user.avatar_url = Some(avatar_url);
            }
            user.updated_at = Utc::now();
        }
    }

    /// Registers a category. Already-known names are left alone.
    pub fn add_category(&mut self, category: &str) {
        if !self.categories.iter().any(|c| c == category) {
            self.categories.push(category.to_string());
        }
    }

    /// Replaces the signed-in user, or clears it on sign-out.
    pub fn set_user(&mut self, user: Option<Profile>) {
        self.user = user;
    }

    /// Replaces the KPI collection, registering any categories the incoming
    /// rows introduce.
    pub fn set_kpis(&mut self, kpis: Vec<StoreKpi>) {
        for kpi in &kpis {
            self.add_category(&kpi.category);
        }
        self.kpis = kpis;
    }

    /// Replaces the integration collection.
    pub fn set_integrations(&mut self, integrations: Vec<Integration>) {
        self.integrations = integrations;
    }

    pub fn set_loading(&mut self, is_loading: bool) {
        self.is_loading = is_loading;
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    /// Applies a server KPI row: merges into the matching KPI or appends a
    /// new one. Local-only fields (tags, history, created_at) survive a
    /// merge.
    pub fn upsert_kpi(&mut self, record: KpiRecord) {
        let category = record.category.clone();
        if let Some(kpi) = self.kpis.iter_mut().find(|k| k.id == record.id) {
            kpi.metric_name = record.metric_name;
            kpi.value = record.value;
            kpi.target = record.target;
            kpi.unit = record.unit;
            kpi.category = record.category;
            kpi.change_percent = record.change_percent;
            kpi.trend = record.trend;
            kpi.updated_at = record.recorded_at;
        } else {
            self.kpis.push(StoreKpi::from(record));
        }
        self.add_category(&category);
    }

    /// Applies a server integration row: replaces the matching row or
    /// appends it.
    pub fn upsert_integration(&mut self, integration: Integration) {
        if let Some(existing) = self
            .integrations
            .iter_mut()
            .find(|i| i.id == integration.id)
        {
            *existing = integration;
        } else {
            self.integrations.push(integration);
        }
    }

    /// Removes an integration by id; no-op when absent.
    pub fn remove_integration(&mut self, id: Uuid) -> bool {
        let before = self.integrations.len();
        self.integrations.retain(|i| i.id != id);
        self.integrations.len() != before
    }

    pub fn user(&self) -> Option<&Profile> {
        self.user.as_ref()
    }

    pub fn kpis(&self) -> &[StoreKpi] {
        &self.kpis
    }

    /// The KPIs of one category, in insertion order.
    pub fn kpis_by_category(&self, category: &str) -> Vec<&StoreKpi> {
        self.kpis.iter().filter(|k| k.category == category).collect()
    }

    pub fn integrations(&self) -> &[Integration] {
        &self.integrations
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl Default for DashboardStore {
    fn default() -> Self {
        Self::new()
    }
}
