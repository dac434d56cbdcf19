//! Runtime configuration for the hosted backend connection.

use std::env;

use pulseboard_core::{Error, Result};

/// Default base URL for the hosted Pulseboard backend.
pub const DEFAULT_API_URL: &str = "https://api.pulseboard.app";

/// Environment variable overriding the backend base URL.
pub const API_URL_ENV: &str = "PULSEBOARD_API_URL";

/// Environment variable holding the backend's publishable API key.
pub const API_KEY_ENV: &str = "PULSEBOARD_API_KEY";

/// Connection settings for the hosted backend.
#[derive(Debug, Clone)]
pub struct CloudConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
    /// Publishable API key sent with every request.
    pub api_key: String,
}

impl CloudConfig {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Reads the configuration from the environment.
    ///
    /// `PULSEBOARD_API_URL` falls back to the hosted default;
    /// `PULSEBOARD_API_KEY` has no default and must be set.
    pub fn from_env() -> Result<Self> {
        let base_url = env::var(API_URL_ENV)
            .ok()
            .map(|value| value.trim().trim_end_matches('/').to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let api_key = env::var(API_KEY_ENV)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| Error::Unexpected(format!("{} is not set", API_KEY_ENV)))?;

        Ok(Self { base_url, api_key })
    }
}
