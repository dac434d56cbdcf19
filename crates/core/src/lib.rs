//! Pulseboard Core - Domain entities, services, and traits.
//!
//! This crate contains the core business logic for Pulseboard.
//! It is backend-agnostic and defines traits that are implemented
//! by the `cloud` crate.

pub mod auth;
pub mod constants;
pub mod dashboard;
pub mod errors;
pub mod integrations;
pub mod kpis;
pub mod profiles;
pub mod realtime;
pub mod store;
pub mod sync;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
