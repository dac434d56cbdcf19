//! Auth module - session and user models, plus the traits the data-access
//! layer uses to resolve the authenticated caller.

mod auth_model;
mod auth_traits;

pub use auth_model::{AuthSession, AuthUser, Credentials, SignUpData, MIN_PASSWORD_LENGTH};
pub use auth_traits::{AuthServiceTrait, MockSessionProvider, SessionProviderTrait};
