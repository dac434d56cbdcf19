//! Pulseboard Cloud - hosted backend access for Pulseboard.
//!
//! This crate implements the auth and data-access traits from
//! `pulseboard_core` against the hosted backend's REST and auth endpoints.
//! Callers only ever see core types; HTTP details stay in here.

pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod rest;

// Re-export commonly used types
pub use auth::AuthClient;
pub use client::{ApiClient, SharedSession};
pub use config::{CloudConfig, DEFAULT_API_URL};
pub use errors::CloudError;
pub use rest::{IntegrationRepository, KpiRepository, ProfileRepository, SyncLogRepository};
