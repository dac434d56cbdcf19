//! Profile repository and service traits.

use async_trait::async_trait;
use uuid::Uuid;

use super::profiles_model::{NewProfile, Profile, ProfileUpdate};
use crate::errors::Result;

/// Trait defining the contract for Profile repository operations.
#[async_trait]
pub trait ProfileRepositoryTrait: Send + Sync {
    /// Retrieves the profile of `user_id`.
    async fn get(&self, user_id: Uuid) -> Result<Profile>;

    /// Creates the profile of `user_id`.
    async fn create(&self, user_id: Uuid, new_profile: NewProfile) -> Result<Profile>;

    /// Applies a partial update to the profile of `user_id`.
    async fn update(&self, user_id: Uuid, update: ProfileUpdate) -> Result<Profile>;
}

/// Trait defining the contract for Profile service operations.
#[async_trait]
pub trait ProfileServiceTrait: Send + Sync {
    /// Gets the caller's profile.
    async fn get_profile(&self) -> Result<Profile>;

    /// Creates the caller's profile.
    async fn create_profile(&self, new_profile: NewProfile) -> Result<Profile>;

    /// Updates the caller's profile with business validation.
    async fn update_profile(&self, update: ProfileUpdate) -> Result<Profile>;
}
