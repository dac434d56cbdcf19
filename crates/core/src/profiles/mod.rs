//! Profiles module - domain models, services, and traits.

mod profiles_model;
mod profiles_service;
mod profiles_traits;


// Re-export the public interface
pub use profiles_model::{NewProfile, Profile, ProfileDraft, ProfileUpdate};
pub use profiles_service::ProfileService;
pub use profiles_traits::{ProfileRepositoryTrait, ProfileServiceTrait};
