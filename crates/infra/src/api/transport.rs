//! REST transport for the tracker API
//!
//! Implements the core [`Transport`] port on top of [`HttpClient`]. Owns
//! base-URL joining and the authentication header. Retry policy lives at
//! this layer, defaulting to a single attempt because the tracker's write
//! endpoints are not idempotent.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde_json::Value;
use tally_core::time_entry::ports::{Transport, TransportError, TransportResult};
use tally_domain::{Result, TallyError};
use tracing::instrument;

use crate::config::ApiConfig;
use crate::http::HttpClient;

/// Connection settings for [`RestTransport`].
#[derive(Debug, Clone)]
pub struct RestTransportConfig {
    /// Base URL of the tracker, e.g. `https://tracker.example.com`.
    pub base_url: String,
    /// API key sent on every request.
    pub api_key: String,
    /// Header the API key is sent under.
    pub api_key_header: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Total HTTP attempts (initial try + retries on 5xx/connect failures).
    pub max_attempts: usize,
}

impl RestTransportConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            api_key_header: "X-Api-Key".to_string(),
            timeout: Duration::from_secs(30),
            max_attempts: 1,
        }
    }
}

impl From<&ApiConfig> for RestTransportConfig {
    fn from(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            api_key_header: config.api_key_header.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            max_attempts: config.max_attempts,
        }
    }
}

/// HTTP implementation of the core transport port.
pub struct RestTransport {
    http: HttpClient,
    base_url: String,
}

impl RestTransport {
    /// Build a transport; the API key becomes a default header on every
    /// request.
    ///
    /// # Errors
    /// Returns `TallyError::Config` for an invalid header name,
    /// `TallyError::Auth` for an API key that cannot be sent as a header
    /// value, `TallyError::Network` if the underlying client cannot be
    /// constructed.
    pub fn new(config: &RestTransportConfig) -> Result<Self> {
        let header_name = HeaderName::from_bytes(config.api_key_header.as_bytes())
            .map_err(|err| TallyError::Config(format!("invalid API key header name: {err}")))?;
        let mut header_value = HeaderValue::from_str(&config.api_key)
            .map_err(|err| TallyError::Auth(format!("invalid API key value: {err}")))?;
        header_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(header_name, header_value);

        let http = HttpClient::builder()
            .timeout(config.timeout)
            .max_attempts(config.max_attempts)
            .default_headers(headers)
            .user_agent("tally")
            .build()?;

        Ok(Self { http, base_url: config.base_url.trim_end_matches('/').to_string() })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send the request and translate the outcome into the port's error
    /// shape: non-2xx responses carry their status and body text,
    /// connection-level failures carry no status, empty 2xx bodies become
    /// JSON `null`.
    async fn execute(&self, builder: reqwest::RequestBuilder) -> TransportResult {
        let response =
            self.http.send(builder).await.map_err(|err| TransportError::network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                body
            };
            return Err(TransportError::status(status.as_u16(), message));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| TransportError::network(format!("failed to read response: {err}")))?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes)
            .map_err(|err| TransportError::network(format!("malformed response body: {err}")))
    }
}

#[async_trait]
impl Transport for RestTransport {
    #[instrument(skip(self, body), fields(path = %path))]
    async fn post(&self, path: &str, body: &Value) -> TransportResult {
        self.execute(self.http.request(Method::POST, self.url(path)).json(body)).await
    }

    #[instrument(skip(self, body), fields(path = %path))]
    async fn put(&self, path: &str, body: &Value) -> TransportResult {
        self.execute(self.http.request(Method::PUT, self.url(path)).json(body)).await
    }

    #[instrument(skip(self), fields(path = %path))]
    async fn delete(&self, path: &str) -> TransportResult {
        self.execute(self.http.request(Method::DELETE, self.url(path))).await
    }

    #[instrument(skip(self, query), fields(path = %path))]
    async fn get(&self, path: &str, query: &[(String, String)]) -> TransportResult {
        self.execute(self.http.request(Method::GET, self.url(path)).query(query)).await
    }
}
