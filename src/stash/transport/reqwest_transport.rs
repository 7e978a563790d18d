//! `reqwest` implementation of the transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::stash::error::StashError;

use super::error_mapping::{extract_stash_message, map_http_error, map_reqwest_error};
use super::{Transport, TransportRequest, TransportResponse};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`HttpTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpTransportConfig {
    /// Server base URL, e.g. `https://stash.example.com/`.
    pub base_url: String,
    /// Personal access token sent as a bearer token.
    pub token: Option<String>,
    /// HTTP timeout for each request.
    pub timeout: Duration,
}

impl HttpTransportConfig {
    /// Constructs configuration for the given server.
    #[must_use]
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Overrides the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Transport that talks to a Stash server over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpTransport {
    /// Builds a transport from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StashError::InvalidUrl`] when the base URL cannot be parsed
    /// and [`StashError::Configuration`] when the HTTP client cannot be
    /// built.
    pub fn new(config: HttpTransportConfig) -> Result<Self, StashError> {
        let base_url = parse_base_url(&config.base_url)?;
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|error| StashError::Configuration {
                message: format!("failed to configure HTTP client: {error}"),
            })?;
        Ok(Self {
            client,
            base_url,
            token: config.token,
        })
    }
}

/// Parses the base URL and ensures it ends with `/` so relative paths join
/// beneath it instead of replacing its last segment.
fn parse_base_url(raw: &str) -> Result<Url, StashError> {
    let mut with_slash = raw.trim().to_owned();
    if !with_slash.ends_with('/') {
        with_slash.push('/');
    }
    let url = Url::parse(&with_slash).map_err(|error| StashError::InvalidUrl(error.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(StashError::InvalidUrl(format!(
            "{raw} cannot be used as a base URL"
        )));
    }
    Ok(url)
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, StashError> {
        let url = self
            .base_url
            .join(&request.path)
            .map_err(|error| StashError::InvalidUrl(error.to_string()))?;
        let operation = format!("{} {}", request.method, url.path());
        debug!(%operation, "sending Stash request");

        let mut builder = self.client.request(request.method, url);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|error| map_reqwest_error(&operation, &error))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|error| map_reqwest_error(&operation, &error))?;
        debug!(%operation, status = status.as_u16(), bytes = text.len(), "received Stash response");

        if !status.is_success() {
            return Err(map_http_error(
                &operation,
                status,
                extract_stash_message(&text),
            ));
        }

        let body = if text.trim().is_empty() {
            None
        } else {
            let value: Value =
                serde_json::from_str(&text).map_err(|error| StashError::Decode {
                    message: format!("{operation} returned invalid JSON: {error}"),
                })?;
            Some(value)
        };

        Ok(TransportResponse {
            status: status.as_u16(),
            body,
        })
    }
}
