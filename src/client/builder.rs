use crate::client::config::{
    ClientConfig, DEFAULT_BASE_URL, DEFAULT_MAX_RETRIES, DEFAULT_REQUEST_TIMEOUT,
    DEFAULT_RETRY_DELAY,
};
use crate::client::core::ArkClient;
use crate::transport::CompletionTransport;
use crate::{Error, ErrorContext, Result};
use std::sync::Arc;
use std::time::Duration;

/// Builder for creating clients with custom configuration.
///
/// Unset values fall back to the environment, then to defaults:
/// - `ARK_API_KEY` (required)
/// - `ARK_BASE_URL` (default [`DEFAULT_BASE_URL`])
/// - `ARK_MAX_RETRIES` (default 3)
/// - `ARK_RETRY_DELAY_MS` (default 1000)
/// - `ARK_TIMEOUT_SECS` (default 60)
#[derive(Default)]
pub struct ArkClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    max_retries: Option<u32>,
    retry_delay: Option<Duration>,
    max_retry_delay: Option<Duration>,
    request_timeout: Option<Duration>,
    transport: Option<Arc<dyn CompletionTransport>>,
}

impl ArkClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn max_retries(mut self, n: u32) -> Self {
        self.max_retries = Some(n);
        self
    }

    /// Base delay of the exponential backoff. Must be non-zero.
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = Some(delay);
        self
    }

    /// Cap individual backoff waits. Without it delays grow unbounded.
    pub fn max_retry_delay(mut self, cap: Duration) -> Self {
        self.max_retry_delay = Some(cap);
        self
    }

    /// Per-attempt timeout (default 60s).
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Replace the HTTP transport.
    ///
    /// This is primarily for testing; `base_url` and `request_timeout` are then
    /// only recorded in the configuration.
    pub fn transport(mut self, transport: Arc<dyn CompletionTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Resolve and validate the configuration without building a client.
    pub fn build_config(&self) -> Result<ClientConfig> {
        let api_key = self
            .api_key
            .clone()
            .or_else(|| std::env::var("ARK_API_KEY").ok())
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                Error::configuration_with_context(
                    "API key is required",
                    ErrorContext::new()
                        .with_field_path("config.api_key")
                        .with_details("set ARK_API_KEY or call ArkClientBuilder::api_key")
                        .with_source("client_builder"),
                )
            })?;

        let base_url = self
            .base_url
            .clone()
            .or_else(|| std::env::var("ARK_BASE_URL").ok())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        validate_base_url(&base_url)?;

        let max_retries = self
            .max_retries
            .or_else(|| env_parse::<u32>("ARK_MAX_RETRIES"))
            .unwrap_or(DEFAULT_MAX_RETRIES);

        let retry_delay = self
            .retry_delay
            .or_else(|| env_parse::<u64>("ARK_RETRY_DELAY_MS").map(Duration::from_millis))
            .unwrap_or(DEFAULT_RETRY_DELAY);
        if retry_delay.is_zero() {
            return Err(Error::configuration_with_context(
                "retry delay must be greater than zero",
                ErrorContext::new()
                    .with_field_path("config.retry_delay")
                    .with_source("client_builder"),
            ));
        }

        let request_timeout = self
            .request_timeout
            .or_else(|| env_parse::<u64>("ARK_TIMEOUT_SECS").map(Duration::from_secs))
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);
        if request_timeout.is_zero() {
            return Err(Error::configuration_with_context(
                "request timeout must be greater than zero",
                ErrorContext::new()
                    .with_field_path("config.request_timeout")
                    .with_source("client_builder"),
            ));
        }

        Ok(ClientConfig {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_retries,
            retry_delay,
            max_retry_delay: self.max_retry_delay,
            request_timeout,
        })
    }

    /// Build the client.
    pub fn build(self) -> Result<ArkClient> {
        let config = self.build_config()?;
        match self.transport {
            Some(transport) => Ok(ArkClient::with_transport(config, transport)),
            None => ArkClient::from_config(config),
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok()?.trim().parse::<T>().ok()
}

fn validate_base_url(raw: &str) -> Result<()> {
    let parsed = url::Url::parse(raw).map_err(|e| {
        Error::configuration_with_context(
            format!("invalid base URL: {}", e),
            ErrorContext::new()
                .with_field_path("config.base_url")
                .with_details(raw.to_string())
                .with_source("client_builder"),
        )
    })?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(Error::configuration_with_context(
            "base URL must use http or https",
            ErrorContext::new()
                .with_field_path("config.base_url")
                .with_details(raw.to_string())
                .with_source("client_builder"),
        ));
    }
    Ok(())
}
