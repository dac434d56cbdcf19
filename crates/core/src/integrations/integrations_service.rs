use log::debug;
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::integrations_model::{Integration, IntegrationUpdate, NewIntegration};
use super::integrations_traits::{IntegrationRepositoryTrait, IntegrationServiceTrait};
use crate::auth::SessionProviderTrait;
use crate::errors::Result;
use crate::Error;

/// Service for managing platform integrations.
pub struct IntegrationService {
    repository: Arc<dyn IntegrationRepositoryTrait>,
    session: Arc<dyn SessionProviderTrait>,
}

impl IntegrationService {
    /// Creates a new IntegrationService instance
    pub fn new(
        repository: Arc<dyn IntegrationRepositoryTrait>,
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
impl IntegrationServiceTrait for IntegrationService {
    async fn get_integrations(&self) -> Result<Vec<Integration>> {
        let user_id = self.current_user_id()?;
        self.repository.list(user_id).await
    }

    async fn get_integration(&self, integration_id: Uuid) -> Result<Integration> {
        let user_id = self.current_user_id()?;
        self.repository.get_by_id(user_id, integration_id).await
    }

    /// Connects a new platform after validating the input.
    async fn connect_integration(&self, new_integration: NewIntegration) -> Result<Integration> {
        let user_id = self.current_user_id()?;
        new_integration.validate()?;
        debug!(
            "Connecting {} store '{}' for user {}",
            new_integration.platform.display_name(),
            new_integration.store_name,
            user_id
        );
        self.repository.create(user_id, new_integration).await
    }

    async fn update_integration(
        &self,
        integration_id: Uuid,
        update: IntegrationUpdate,
    ) -> Result<Integration> {
        let user_id = self.current_user_id()?;
        if update.is_empty() {
            debug!(
                "Empty integration update for {}, returning current record",
                integration_id
            );
            return self.repository.get_by_id(user_id, integration_id).await;
        }
        self.repository.update(user_id, integration_id, update).await
    }

    async fn delete_integration(&self, integration_id: Uuid) -> Result<()> {
        let user_id = self.current_user_id()?;
        debug!("Deleting integration {} for user {}", integration_id, user_id);
        self.repository.delete(user_id, integration_id).await
    }
}
