use log::debug;
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::profiles_model::{NewProfile, Profile, ProfileUpdate};
use super::profiles_traits::{ProfileRepositoryTrait, ProfileServiceTrait};
use crate::auth::SessionProviderTrait;
use crate::errors::Result;
use crate::Error;

/// Service for managing the signed-in user's profile.
pub struct ProfileService {
    repository: Arc<dyn ProfileRepositoryTrait>,
    session: Arc<dyn SessionProviderTrait>,
}

impl ProfileService {
    /// Creates a new ProfileService instance
    pub fn new(
        repository: Arc<dyn ProfileRepositoryTrait>,
        session: Arc<dyn SessionProviderTrait>,
    ) -> Self {
        Self {
            repository,
            session,
        }
    }

    fn current_user_id(&self) -> Result<Uuid> {
        self.session.current_user_id().ok_or(Error::Unauthenticated)
    }
}

#[async_trait]
impl ProfileServiceTrait for ProfileService {
    async fn get_profile(&self) -> Result<Profile> {
        let user_id = self.current_user_id()?;
        self.repository.get(user_id).await
    }

    /// Creates the caller's profile after validating the input.
    async fn create_profile(&self, new_profile: NewProfile) -> Result<Profile> {
        let user_id = self.current_user_id()?;
        new_profile.validate()?;
        debug!("Creating profile for user {}", user_id);
        self.repository.create(user_id, new_profile).await
    }

    async fn update_profile(&self, update: ProfileUpdate) -> Result<Profile> {
        let user_id = self.current_user_id()?;
        if update.is_empty() {
            debug!("Empty profile update, returning current profile");
            return self.repository.get(user_id).await;
        }
        update.validate()?;
        self.repository.update(user_id, update).await
    }
}
