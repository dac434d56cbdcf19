//! Auth client for the hosted backend's auth endpoints.
//!
//! Implements the core auth traits over the provider's token endpoints and
//! keeps the resulting session in the slot shared with [`ApiClient`], so a
//! sign-in immediately authorizes every REST repository.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use uuid::Uuid;

use pulseboard_core::auth::{
    AuthServiceTrait, AuthSession, AuthUser, Credentials, SessionProviderTrait, SignUpData,
    MIN_PASSWORD_LENGTH,
};
use pulseboard_core::errors::{Result, ValidationError};
use pulseboard_core::utils::is_valid_email;
use pulseboard_core::Error;

use crate::client::{ApiClient, SharedSession};
use crate::config::CloudConfig;

// ─────────────────────────────────────────────────────────────────────────────
// Wire Types (internal, matching the auth provider's JSON)
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, serde::Serialize)]
struct SignUpRequest<'a> {
    email: &'a str,
    password: &'a str,
    data: SignUpMetadata<'a>,
}

/// Profile fields carried as user metadata on sign-up; the backend copies
/// them into the profile row it creates for the new account.
#[derive(Debug, serde::Serialize)]
struct SignUpMetadata<'a> {
    first_name: &'a str,
    last_name: &'a str,
}

#[derive(Debug, serde::Serialize)]
struct PasswordGrantRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, serde::Serialize)]
struct RecoverRequest<'a> {
    email: &'a str,
}

#[derive(Debug, serde::Serialize)]
struct UpdateUserRequest<'a> {
    password: &'a str,
}

#[derive(Debug, serde::Deserialize)]
struct SessionResponse {
    access_token: String,
    refresh_token: String,
    expires_in: i64,
    user: UserResponse,
}

impl SessionResponse {
    fn into_session(self, now: DateTime<Utc>) -> AuthSession {
        AuthSession {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at: now + chrono::Duration::seconds(self.expires_in),
            user: self.user.into_user(),
        }
    }
}

#[derive(Debug, serde::Deserialize)]
struct UserResponse {
    id: Uuid,
    email: Option<String>,
    created_at: DateTime<Utc>,
}

impl UserResponse {
    fn into_user(self) -> AuthUser {
        AuthUser {
            id: self.id,
            email: self.email.unwrap_or_default(),
            created_at: self.created_at,
        }
    }
}

/// Sign-up either issues a session right away or, when the provider requires
/// email confirmation first, returns just the created user.
#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(SessionResponse),
    Pending(UserResponse),
}

// ─────────────────────────────────────────────────────────────────────────────
// Auth Client
// ─────────────────────────────────────────────────────────────────────────────

/// Client for the hosted auth provider.
///
/// Owns the canonical session slot. [`session_handle`](Self::session_handle)
/// and [`api_client`](Self::api_client) hand out shared views of it for
/// wiring up repositories and the realtime transport.
pub struct AuthClient {
    api: ApiClient,
    session: SharedSession,
}

impl AuthClient {
    pub fn new(config: &CloudConfig) -> Result<Self> {
        let session: SharedSession = Arc::new(RwLock::new(None));
        let api = ApiClient::new(config, session.clone())?;
        Ok(Self { api, session })
    }

    /// The session slot shared with the REST client.
    pub fn session_handle(&self) -> SharedSession {
        self.session.clone()
    }

    /// An API client bound to this auth client's session.
    pub fn api_client(&self) -> ApiClient {
        self.api.clone()
    }

    fn store_session(&self, session: AuthSession) {
        *self.session.write().unwrap() = Some(session);
    }
}

#[async_trait]
impl AuthServiceTrait for AuthClient {
    async fn sign_up(&self, data: SignUpData) -> Result<Option<AuthSession>> {
        data.validate()?;
        debug!("[CloudAuth] Signing up new account");

        let request = SignUpRequest {
            email: &data.email,
            password: &data.password,
            data: SignUpMetadata {
                first_name: &data.first_name,
                last_name: &data.last_name,
            },
        };
        let response: SignUpResponse = self.api.post("/auth/v1/signup", &request).await?;

        match response {
            SignUpResponse::Session(raw) => {
                let session = raw.into_session(Utc::now());
                self.store_session(session.clone());
                debug!("[CloudAuth] Signed up and in as {}", session.user.id);
                Ok(Some(session))
            }
            SignUpResponse::Pending(user) => {
                debug!(
                    "[CloudAuth] Sign-up for {} awaiting email confirmation",
                    user.id
                );
                Ok(None)
            }
        }
    }

    async fn sign_in(&self, credentials: Credentials) -> Result<AuthSession> {
        credentials.validate()?;

        let request = PasswordGrantRequest {
            email: &credentials.email,
            password: &credentials.password,
        };
        let response: SessionResponse = self
            .api
            .post("/auth/v1/token?grant_type=password", &request)
            .await?;

        let session = response.into_session(Utc::now());
        self.store_session(session.clone());
        debug!("[CloudAuth] Signed in as {}", session.user.id);
        Ok(session)
    }

    async fn sign_out(&self) -> Result<()> {
        if self.session.read().unwrap().is_none() {
            return Ok(());
        }

        // Revoke first while the bearer token is still attached, then clear
        // unconditionally: the local session must not outlive a sign-out.
        let revoke = self
            .api
            .post_no_content("/auth/v1/logout", &serde_json::json!({}))
            .await;
        *self.session.write().unwrap() = None;

        if let Err(err) = revoke {
            warn!("[CloudAuth] Sign-out revoke failed: {}", err);
        }
        debug!("[CloudAuth] Signed out");
        Ok(())
    }

    async fn request_password_reset(&self, email: &str) -> Result<()> {
        if !is_valid_email(email) {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Email address is not valid".to_string(),
            )));
        }
        self.api
            .post_no_content("/auth/v1/recover", &RecoverRequest { email })
            .await
    }

    async fn update_password(&self, new_password: &str) -> Result<AuthUser> {
        if self.session.read().unwrap().is_none() {
            return Err(Error::Unauthenticated);
        }
        if new_password.len() < MIN_PASSWORD_LENGTH {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            ))));
        }

        let response: UserResponse = self
            .api
            .put(
                "/auth/v1/user",
                &UpdateUserRequest {
                    password: new_password,
                },
            )
            .await?;
        let user = response.into_user();

        // Tokens are unchanged by a password update; refresh the cached user.
        if let Some(session) = self.session.write().unwrap().as_mut() {
            session.user = user.clone();
        }
        Ok(user)
    }

    fn current_session(&self) -> Option<AuthSession> {
        self.session.read().unwrap().clone()
    }

    fn current_user(&self) -> Option<AuthUser> {
        self.session
            .read()
            .unwrap()
            .as_ref()
            .map(|session| session.user.clone())
    }
}

impl SessionProviderTrait for AuthClient {
    fn current_user_id(&self) -> Option<Uuid> {
        self.session
            .read()
            .unwrap()
            .as_ref()
            .map(|session| session.user.id)
    }
}
