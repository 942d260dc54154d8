//! HTTP client for the admin backend
//!
//! Low-level request plumbing: headers, timeouts and envelope decoding.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CACHE_CONTROL};
use reqwest::{Client, ClientBuilder, Method};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, instrument};

use crate::config::ApiConfig;
use crate::models::ApiEnvelope;

/// Header identifying the acting admin user
const USER_HEADER: &str = "new-api-user";

/// Client for the admin REST API
pub struct ApiClient {
    http_client: Client,
    base_url: String,
    timeout: Duration,
}

/// Errors of the API client
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("HTTP error: status {0}")]
    HttpError(u16),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Timeout: request took longer than {0}s")]
    Timeout(u64),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiClient {
    /// Creates a new API client
    ///
    /// # Arguments
    ///
    /// * `base_url` - Backend root (e.g. "http://localhost:3000")
    /// * `access_token` - Optional bearer token
    /// * `user_id` - Optional acting user id for the `New-Api-User` header
    /// * `timeout` - Per-request timeout
    pub fn new(
        base_url: &str,
        access_token: Option<&str>,
        user_id: Option<i64>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));

        if let Some(token) = access_token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ApiError::Config(format!("invalid access token: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }
        if let Some(user_id) = user_id {
            headers.insert(USER_HEADER, HeaderValue::from(user_id));
        }

        let http_client = ClientBuilder::new()
            .default_headers(headers)
            .timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| ApiError::Connection(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Creates a client from the `[api]` configuration section
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        if config.base_url.trim().is_empty() {
            return Err(ApiError::Config("api.base_url not set".to_string()));
        }

        Self::new(
            &config.base_url,
            config.access_token.as_deref().filter(|token| !token.is_empty()),
            config.user_id,
            config.timeout(),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends a request and decodes the response envelope
    #[instrument(skip(self, body), fields(method = %method, path = %path))]
    pub(crate) async fn request<B, R>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<ApiEnvelope<R>, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let mut builder = self.http_client.request(method.clone(), self.url(path));
        if let Some(body) = body {
            builder = builder.json(body);
        }

        debug!("API request: {} {}", method, path);

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout(self.timeout.as_secs())
            } else {
                ApiError::Connection(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            error!("API HTTP error: status={}", status);
            return Err(ApiError::HttpError(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::ParseError(format!("Failed to read response body: {}", e)))?;

        debug!("API response: {}", body);

        serde_json::from_str(&body).map_err(|e| {
            ApiError::ParseError(format!("Failed to parse JSON: {} - Body: {}", e, body))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = ApiClient::new("http://localhost:3000", None, None, Duration::from_secs(5));
        assert!(client.is_ok());
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = ApiClient::new(
            "http://localhost:3000/",
            Some("token"),
            Some(1),
            Duration::from_secs(5),
        )
        .unwrap();

        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(client.url("/api/redemption/"), "http://localhost:3000/api/redemption/");
    }

    #[test]
    fn test_invalid_token_rejected() {
        let client = ApiClient::new(
            "http://localhost:3000",
            Some("bad\ntoken"),
            None,
            Duration::from_secs(5),
        );
        assert!(matches!(client, Err(ApiError::Config(_))));
    }

    #[test]
    fn test_from_config_requires_base_url() {
        let config = ApiConfig {
            base_url: "  ".to_string(),
            ..Default::default()
        };
        assert!(matches!(ApiClient::from_config(&config), Err(ApiError::Config(_))));
    }
}
