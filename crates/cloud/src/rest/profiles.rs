//! Profile repository over the `profiles` table.
//!
//! Profiles are keyed by the owning user; there is exactly one row per
//! account, so every operation filters on `user_id` alone.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pulseboard_core::profiles::{NewProfile, Profile, ProfileRepositoryTrait, ProfileUpdate};
use pulseboard_core::Result;

use super::{missing_returned_row, row_not_found};
use crate::client::ApiClient;

/// Row shape of the `profiles` table.
#[derive(Debug, Deserialize)]
struct ProfileRow {
    user_id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    avatar_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

// Conversion to domain models
impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile {
            user_id: row.user_id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            avatar_url: row.avatar_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Insert payload for `profiles`; timestamps default on the backend.
#[derive(Debug, Serialize)]
struct NewProfileRow<'a> {
    user_id: Uuid,
    first_name: &'a str,
    last_name: &'a str,
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    avatar_url: Option<&'a str>,
}

impl<'a> NewProfileRow<'a> {
    fn from_input(user_id: Uuid, input: &'a NewProfile) -> Self {
        Self {
            user_id,
            first_name: &input.first_name,
            last_name: &input.last_name,
            email: &input.email,
            avatar_url: input.avatar_url.as_deref(),
        }
    }
}

/// Patch payload for `profiles`. Every update stamps `updated_at`; the
/// other fields ride along only when set.
#[derive(Debug, Serialize)]
struct ProfileChanges<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    first_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    avatar_url: Option<&'a str>,
    updated_at: DateTime<Utc>,
}

impl<'a> ProfileChanges<'a> {
    fn from_update(update: &'a ProfileUpdate) -> Self {
        Self {
            first_name: update.first_name.as_deref(),
            last_name: update.last_name.as_deref(),
            email: update.email.as_deref(),
            avatar_url: update.avatar_url.as_deref(),
            updated_at: Utc::now(),
        }
    }
}

pub struct ProfileRepository {
    api: ApiClient,
}

impl ProfileRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ProfileRepositoryTrait for ProfileRepository {
    async fn get(&self, user_id: Uuid) -> Result<Profile> {
        let path = format!("/rest/v1/profiles?select=*&user_id=eq.{}", user_id);
        let rows: Vec<ProfileRow> = self.api.get(&path).await?;
        rows.into_iter()
            .next()
            .map(Profile::from)
            .ok_or_else(|| row_not_found("Profile for user", user_id))
    }

    async fn create(&self, user_id: Uuid, new_profile: NewProfile) -> Result<Profile> {
        let row = NewProfileRow::from_input(user_id, &new_profile);
        let rows: Vec<ProfileRow> = self.api.insert("/rest/v1/profiles", &row).await?;
        rows.into_iter()
            .next()
            .map(Profile::from)
            .ok_or_else(|| missing_returned_row("profile"))
    }

    async fn update(&self, user_id: Uuid, update: ProfileUpdate) -> Result<Profile> {
        let changes = ProfileChanges::from_update(&update);
        let path = format!("/rest/v1/profiles?user_id=eq.{}", user_id);
        let rows: Vec<ProfileRow> = self.api.update(&path, &changes).await?;
        rows.into_iter()
            .next()
            .map(Profile::from)
            .ok_or_else(|| row_not_found("Profile for user", user_id))
    }
}
