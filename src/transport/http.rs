use crate::types::{CompletionRequest, CompletionResponse};
use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

use super::fault::{FaultKind, TransportFault};
use super::CompletionTransport;

/// reqwest-backed transport for `POST {base_url}/chat/completions`.
///
/// One attempt per [`send`](CompletionTransport::send); reqwest performs no
/// retries of its own, so the client's retry loop is the only one.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl HttpTransport {
    pub fn new(base_url: &str, api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Some(Duration::from_secs(90)))
            .build()
            .map_err(|e| {
                Error::configuration_with_context(
                    format!("Failed to create HTTP client: {}", e),
                    ErrorContext::new().with_source("http_transport"),
                )
            })?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key: api_key.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionTransport for HttpTransport {
    async fn send(
        &self,
        request: &CompletionRequest,
    ) -> std::result::Result<CompletionResponse, TransportFault> {
        let client_request_id = Uuid::new_v4().to_string();
        let start = std::time::Instant::now();

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            // Our own correlation id; the provider may ignore it.
            .header("x-client-request-id", &client_request_id)
            .json(request)
            .send()
            .await
            .map_err(|e| TransportFault::from_reqwest(&e))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| TransportFault::from_reqwest(&e))?;

        debug!(
            http_status = status.as_u16(),
            client_request_id = client_request_id.as_str(),
            duration_ms = start.elapsed().as_millis() as u64,
            "ark request finished"
        );

        if !status.is_success() {
            return Err(TransportFault::from_status(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            TransportFault::new(
                FaultKind::Other,
                format!("Failed to parse response JSON: {}", e),
            )
            .with_code("invalid_response")
        })
    }
}
