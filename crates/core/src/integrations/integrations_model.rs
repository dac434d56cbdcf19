//! Integration domain models.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::integrations_constants::{
    HEALTH_THRESHOLD_DAILY_HOURS, HEALTH_THRESHOLD_HOURLY_HOURS, HEALTH_THRESHOLD_REALTIME_HOURS,
    HEALTH_THRESHOLD_WEEKLY_HOURS,
};
use crate::errors::FieldError;
use crate::{errors::ValidationError, Error, Result};

/// E-commerce platform an integration connects to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Shopify,
    Etsy,
    Woocommerce,
    Squarespace,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Shopify => "shopify",
            Platform::Etsy => "etsy",
            Platform::Woocommerce => "woocommerce",
            Platform::Squarespace => "squarespace",
        }
    }

    /// Human-readable platform name for display.
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Shopify => "Shopify",
            Platform::Etsy => "Etsy",
            Platform::Woocommerce => "WooCommerce",
            Platform::Squarespace => "Squarespace",
        }
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "shopify" => Ok(Platform::Shopify),
            "etsy" => Ok(Platform::Etsy),
            "woocommerce" => Ok(Platform::Woocommerce),
            "squarespace" => Ok(Platform::Squarespace),
            _ => Err(format!("Unknown platform: {}", s)),
        }
    }
}

/// Connection state of an integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationStatus {
    Connected,
    Disconnected,
    Error,
}

impl IntegrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntegrationStatus::Connected => "connected",
            IntegrationStatus::Disconnected => "disconnected",
            IntegrationStatus::Error => "error",
        }
    }
}

/// How often an integration is expected to sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SyncFrequency {
    Realtime,
    Hourly,
    #[default]
    Daily,
    Weekly,
}

impl SyncFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncFrequency::Realtime => "realtime",
            SyncFrequency::Hourly => "hourly",
            SyncFrequency::Daily => "daily",
            SyncFrequency::Weekly => "weekly",
        }
    }

    /// Maximum hours since the last sync before the integration counts as
    /// unhealthy.
    pub fn health_threshold_hours(&self) -> i64 {
        match self {
            SyncFrequency::Realtime => HEALTH_THRESHOLD_REALTIME_HOURS,
            SyncFrequency::Hourly => HEALTH_THRESHOLD_HOURLY_HOURS,
            SyncFrequency::Daily => HEALTH_THRESHOLD_DAILY_HOURS,
            SyncFrequency::Weekly => HEALTH_THRESHOLD_WEEKLY_HOURS,
        }
    }
}

impl FromStr for SyncFrequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "realtime" => Ok(SyncFrequency::Realtime),
            "hourly" => Ok(SyncFrequency::Hourly),
            "daily" => Ok(SyncFrequency::Daily),
            "weekly" => Ok(SyncFrequency::Weekly),
            _ => Err(format!("Unknown sync frequency: {}", s)),
        }
    }
}

/// Domain model representing a connected e-commerce platform.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Integration {
    pub id: Uuid,
    pub user_id: Uuid,
    pub platform: Platform,
    pub status: IntegrationStatus,
    pub api_key: Option<String>,
    pub store_name: String,
    pub sync_frequency: SyncFrequency,
    pub last_sync: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Integration {
    /// Whether the integration has synced recently enough for its frequency,
    /// judged at `now`.
    ///
    /// Never-synced and non-connected integrations are always unhealthy.
    pub fn is_healthy_at(&self, now: DateTime<Utc>) -> bool {
        if self.status != IntegrationStatus::Connected {
            return false;
        }
        let Some(last_sync) = self.last_sync else {
            return false;
        };
        let elapsed_minutes = (now - last_sync).num_minutes();
        elapsed_minutes <= self.sync_frequency.health_threshold_hours() * 60
    }

    /// Convenience wrapper using the current time.
    pub fn is_healthy(&self) -> bool {
        self.is_healthy_at(Utc::now())
    }
}

/// Formats when an integration last synced, relative to `now`.
pub fn format_last_sync(last_sync: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(last_sync) = last_sync else {
        return "Never synced".to_string();
    };
    let hours = (now - last_sync).num_hours();
    if hours < 1 {
        return "Just now".to_string();
    }
    if hours < 24 {
        return format!("{} hour{} ago", hours, if hours > 1 { "s" } else { "" });
    }
    let days = hours / 24;
    if days < 7 {
        return format!("{} day{} ago", days, if days > 1 { "s" } else { "" });
    }
    last_sync.format("%Y-%m-%d").to_string()
}

/// Input model for connecting a new platform.
///
/// Connecting is creating: new integrations start out `connected`, and the
/// service stamps the authenticated user's id on write.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIntegration {
    pub platform: Platform,
    pub store_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default)]
    pub sync_frequency: SyncFrequency,
}

impl NewIntegration {
    /// Validates the new integration data.
    pub fn validate(&self) -> Result<()> {
        if self.store_name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Store name cannot be empty".to_string(),
            )));
        }
        Ok(())
    }
}

/// Input model for updating an existing integration. Absent fields are left
/// as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationUpdate {
    pub store_name: Option<String>,
    pub api_key: Option<String>,
    pub status: Option<IntegrationStatus>,
    pub sync_frequency: Option<SyncFrequency>,
    pub last_sync: Option<DateTime<Utc>>,
}

impl IntegrationUpdate {
    /// Returns true when the patch carries no changes.
    pub fn is_empty(&self) -> bool {
        self.store_name.is_none()
            && self.api_key.is_none()
            && self.status.is_none()
            && self.sync_frequency.is_none()
            && self.last_sync.is_none()
    }
}

/// Raw form input for connecting a platform, exactly as a form submits it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationDraft {
    pub platform: String,
    pub store_name: String,
    /// Empty means the platform needs no key (or OAuth happens elsewhere).
    #[serde(default)]
    pub api_key: String,
    /// Empty falls back to the default frequency.
    #[serde(default)]
    pub sync_frequency: String,
}

impl IntegrationDraft {
    /// Validates the draft, collecting every field error rather than
    /// stopping at the first.
    pub fn validate(&self) -> std::result::Result<NewIntegration, Vec<FieldError>> {
        let mut errors = Vec::new();

        let platform = match Platform::from_str(self.platform.trim()) {
            Ok(p) => Some(p),
            Err(_) => {
                errors.push(FieldError::new(
                    "platform",
                    "Platform must be one of shopify, etsy, woocommerce, squarespace",
                ));
                None
            }
        };

        if self.store_name.trim().is_empty() {
            errors.push(FieldError::new("storeName", "Store name is required"));
        }

        let sync_frequency = if self.sync_frequency.trim().is_empty() {
            Some(SyncFrequency::default())
        } else {
            match SyncFrequency::from_str(self.sync_frequency.trim()) {
                Ok(f) => Some(f),
                Err(_) => {
                    errors.push(FieldError::new(
                        "syncFrequency",
                        "Sync frequency must be one of realtime, hourly, daily, weekly",
                    ));
                    None
                }
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        let api_key = match self.api_key.trim() {
            "" => None,
            key => Some(key.to_string()),
        };

        // Every None pushed an error above, so these defaults are unreachable.
        Ok(NewIntegration {
            platform: platform.unwrap_or(Platform::Shopify),
            store_name: self.store_name.trim().to_string(),
            api_key,
            sync_frequency: sync_frequency.unwrap_or_default(),
        })
    }
}
