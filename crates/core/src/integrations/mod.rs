//! Integrations module - domain models, services, and traits.

mod integrations_constants;
mod integrations_model;
mod integrations_service;
mod integrations_traits;



// Re-export the public interface
pub use integrations_constants::*;
pub use integrations_model::{
    format_last_sync, Integration, IntegrationDraft, IntegrationStatus, IntegrationUpdate,
    NewIntegration, Platform, SyncFrequency,
};
pub use integrations_service::IntegrationService;
pub use integrations_traits::{IntegrationRepositoryTrait, IntegrationServiceTrait};
