//! Auth service and session provider traits.
//!
//! These traits define the contract for authentication without any
//! transport-specific types. The cloud crate implements them against the
//! hosted auth provider.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use uuid::Uuid;

use super::auth_model::{AuthSession, AuthUser, Credentials, SignUpData};
use crate::errors::Result;

/// Trait defining the contract for authentication operations.
#[async_trait]
pub trait AuthServiceTrait: Send + Sync {
    /// Registers a new user.
    ///
    /// Returns `None` when the provider requires email confirmation before
    /// a session is issued.
    async fn sign_up(&self, data: SignUpData) -> Result<Option<AuthSession>>;

    /// Signs in with email and password.
    async fn sign_in(&self, credentials: Credentials) -> Result<AuthSession>;

    /// Signs out and clears the local session.
    ///
    /// The local session is cleared even if the provider-side revocation
    /// fails.
    async fn sign_out(&self) -> Result<()>;

    /// Sends a password reset email.
    async fn request_password_reset(&self, email: &str) -> Result<()>;

    /// Updates the signed-in user's password.
    async fn update_password(&self, new_password: &str) -> Result<AuthUser>;

    /// Returns the current session, if any.
    fn current_session(&self) -> Option<AuthSession>;

    /// Returns the current user, if any.
    fn current_user(&self) -> Option<AuthUser>;
}

/// Trait for resolving the authenticated caller.
///
/// Every data-access service consults this before touching the backend;
/// when it returns `None` the operation fails fast with
/// [`Error::Unauthenticated`](crate::Error::Unauthenticated).
pub trait SessionProviderTrait: Send + Sync {
    /// The id of the signed-in user, or `None` when signed out.
    fn current_user_id(&self) -> Option<Uuid>;
}

/// Session provider backed by a settable value, for tests and embedding
/// contexts that manage sessions themselves.
#[derive(Clone, Default)]
pub struct MockSessionProvider {
    user_id: Arc<RwLock<Option<Uuid>>>,
}

impl MockSessionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a provider that reports the given user as signed in.
    pub fn signed_in(user_id: Uuid) -> Self {
        Self {
            user_id: Arc::new(RwLock::new(Some(user_id))),
        }
    }

    /// Creates a provider that reports no signed-in user.
    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn set_user_id(&self, user_id: Option<Uuid>) {
        *self.user_id.write().unwrap() = user_id;
    }
}

impl SessionProviderTrait for MockSessionProvider {
    fn current_user_id(&self) -> Option<Uuid> {
        *self.user_id.read().unwrap()
    }
}
