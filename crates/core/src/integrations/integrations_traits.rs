//! Integration repository and service traits.

use async_trait::async_trait;
use uuid::Uuid;

use super::integrations_model::{Integration, IntegrationUpdate, NewIntegration};
use crate::errors::Result;

/// Trait defining the contract for Integration repository operations.
///
/// Every method is scoped to one user; implementations must filter reads and
/// writes by `user_id`.
#[async_trait]
pub trait IntegrationRepositoryTrait: Send + Sync {
    /// Lists the user's integrations, newest-first.
    async fn list(&self, user_id: Uuid) -> Result<Vec<Integration>>;

    /// Retrieves a single integration by its id.
    async fn get_by_id(&self, user_id: Uuid, integration_id: Uuid) -> Result<Integration>;

    /// Creates a new integration owned by `user_id`.
    async fn create(&self, user_id: Uuid, new_integration: NewIntegration) -> Result<Integration>;

    /// Applies a partial update to an existing integration.
    async fn update(
        &self,
        user_id: Uuid,
        integration_id: Uuid,
        update: IntegrationUpdate,
    ) -> Result<Integration>;

    /// Deletes an integration by its id.
    async fn delete(&self, user_id: Uuid, integration_id: Uuid) -> Result<()>;
}

/// Trait defining the contract for Integration service operations.
#[async_trait]
pub trait IntegrationServiceTrait: Send + Sync {
    /// Gets all of the caller's integrations, newest-first.
    async fn get_integrations(&self) -> Result<Vec<Integration>>;

    /// Gets a single integration by id.
    async fn get_integration(&self, integration_id: Uuid) -> Result<Integration>;

    /// Connects a new platform with business validation.
    async fn connect_integration(&self, new_integration: NewIntegration) -> Result<Integration>;

    /// Applies a partial update to an integration.
    async fn update_integration(
        &self,
        integration_id: Uuid,
        update: IntegrationUpdate,
    ) -> Result<Integration>;

    /// Removes an integration entirely.
    async fn delete_integration(&self, integration_id: Uuid) -> Result<()>;
}
