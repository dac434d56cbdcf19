//! HTTP client for the hosted Pulseboard backend.
//!
//! This module provides the shared HTTP client used by the auth client and
//! every REST repository. One instance is created per backend and cloned
//! freely; clones share the session lock, so a sign-in is immediately
//! visible to every repository.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use log::debug;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;

use pulseboard_core::auth::AuthSession;
use pulseboard_core::errors::{BackendError, Error, Result};

use crate::config::CloudConfig;
use crate::errors::{CloudError, TransportErrorExt};

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The session slot shared between the auth client and the REST client.
pub type SharedSession = Arc<RwLock<Option<AuthSession>>>;

// ─────────────────────────────────────────────────────────────────────────────
// API Error Body (internal, for parsing backend error responses)
// ─────────────────────────────────────────────────────────────────────────────

/// Error body shape across the backend's surfaces.
///
/// The REST layer reports `message`/`code`, the auth endpoints use
/// `msg`/`error`/`error_description` and sometimes echo the HTTP status as a
/// numeric `code`, so that field is kept loose.
#[derive(Debug, serde::Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    code: Option<serde_json::Value>,
}

impl ApiErrorBody {
    /// The most specific message the backend offered.
    fn best_message(&self) -> Option<String> {
        self.message
            .clone()
            .or_else(|| self.error_description.clone())
            .or_else(|| self.msg.clone())
            .or_else(|| self.error.clone())
    }

    /// The error code, when it is a string code and not an echoed status.
    fn code_str(&self) -> Option<String> {
        self.code
            .as_ref()
            .and_then(|code| code.as_str())
            .map(str::to_string)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Api Client
// ─────────────────────────────────────────────────────────────────────────────

/// HTTP client for the hosted backend's REST and auth endpoints.
///
/// Every request carries the publishable API key; the `Authorization`
/// header is added from the shared session when a user is signed in.
///
/// # Example
///
/// ```ignore
/// let config = CloudConfig::from_env()?;
/// let client = ApiClient::new(&config, session.clone())?;
/// let rows: Vec<KpiRow> = client.get("/rest/v1/kpi_data?select=*").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: HeaderValue,
    session: SharedSession,
}

impl ApiClient {
    /// Create a new API client bound to the given session slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is not a valid header value or the
    /// HTTP client cannot be initialized.
    pub fn new(config: &CloudConfig, session: SharedSession) -> Result<Self> {
        let api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|e| Error::Unexpected(format!("Invalid API key format: {}", e)))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Unexpected(format!("Failed to initialize HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            session,
        })
    }

    /// Create default headers for API requests.
    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(HeaderName::from_static("apikey"), self.api_key.clone());
        if let Some(session) = self.session.read().unwrap().as_ref() {
            if let Ok(bearer) = HeaderValue::from_str(&format!("Bearer {}", session.access_token))
            {
                headers.insert(AUTHORIZATION, bearer);
            }
        }
        headers
    }

    /// Headers for REST writes, which ask the backend to return the row.
    fn write_headers(&self) -> HeaderMap {
        let mut headers = self.headers();
        headers.insert(
            HeaderName::from_static("prefer"),
            HeaderValue::from_static("return=representation"),
        );
        headers
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Request Helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Make a GET request and parse the response.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("[CloudApi] GET {}", url);

        let response = self
            .client
            .get(&url)
            .headers(self.headers())
            .send()
            .await
            .map_err(|e| e.into_core_error())?;

        self.parse_response(response).await
    }

    /// Make a POST request and parse the response.
    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("[CloudApi] POST {}", url);

        let response = self
            .client
            .post(&url)
            .headers(self.headers())
            .json(body)
            .send()
            .await
            .map_err(|e| e.into_core_error())?;

        self.parse_response(response).await
    }

    /// Make a POST request where success has no body to parse.
    pub(crate) async fn post_no_content<B>(&self, path: &str, body: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("[CloudApi] POST {}", url);

        let response = self
            .client
            .post(&url)
            .headers(self.headers())
            .json(body)
            .send()
            .await
            .map_err(|e| e.into_core_error())?;

        self.expect_success(response).await
    }

    /// Make a PUT request and parse the response.
    pub(crate) async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("[CloudApi] PUT {}", url);

        let response = self
            .client
            .put(&url)
            .headers(self.headers())
            .json(body)
            .send()
            .await
            .map_err(|e| e.into_core_error())?;

        self.parse_response(response).await
    }

    /// Insert rows and parse the returned representation.
    pub(crate) async fn insert<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("[CloudApi] POST {}", url);

        let response = self
            .client
            .post(&url)
            .headers(self.write_headers())
            .json(body)
            .send()
            .await
            .map_err(|e| e.into_core_error())?;

        self.parse_response(response).await
    }

    /// Patch rows and parse the returned representation.
    pub(crate) async fn update<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("[CloudApi] PATCH {}", url);

        let response = self
            .client
            .patch(&url)
            .headers(self.write_headers())
            .json(body)
            .send()
            .await
            .map_err(|e| e.into_core_error())?;

        self.parse_response(response).await
    }

    /// Make a DELETE request, expecting no body on success.
    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        let url = format!("{}{}", self.base_url, path);
        debug!("[CloudApi] DELETE {}", url);

        let response = self
            .client
            .delete(&url)
            .headers(self.headers())
            .send()
            .await
            .map_err(|e| e.into_core_error())?;

        self.expect_success(response).await
    }

    /// Parse an HTTP response, handling errors appropriately.
    async fn parse_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await.map_err(|e| e.into_core_error())?;

        if !status.is_success() {
            return Err(error_from_body(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            Error::Backend(BackendError::Serialization(format!(
                "{} in body: {}",
                e,
                snippet(&body)
            )))
        })
    }

    /// Check a response's status, discarding any success body.
    async fn expect_success(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_from_body(status.as_u16(), &body));
        }
        Ok(())
    }
}

/// Builds the core error for a non-success response.
fn error_from_body(status: u16, body: &str) -> Error {
    if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body) {
        let message = parsed
            .best_message()
            .unwrap_or_else(|| format!("HTTP {}", status));
        return CloudError::Api {
            status,
            message,
            code: parsed.code_str(),
        }
        .into();
    }

    let message = if body.trim().is_empty() {
        format!("HTTP {}", status)
    } else {
        snippet(body)
    };
    CloudError::Api {
        status,
        message,
        code: None,
    }
    .into()
}

/// Truncates a response body for inclusion in error messages.
fn snippet(body: &str) -> String {
    body.chars().take(200).collect()
}
