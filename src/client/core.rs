use crate::client::config::ClientConfig;
use crate::client::policy::{Backoff, Decision, RetryPolicy};
use crate::transport::{CompletionTransport, HttpTransport, TransportFault};
use crate::types::{CompletionRequest, CompletionResponse};
use crate::{Error, ErrorContext, Result};
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// Chat-completion client with retry and exponential backoff.
///
/// Holds only immutable configuration and a pooled transport, so one instance
/// can be shared across tasks (`Arc<ArkClient>`) without locking.
pub struct ArkClient {
    config: ClientConfig,
    policy: RetryPolicy,
    transport: Arc<dyn CompletionTransport>,
}

impl ArkClient {
    /// Create a builder.
    pub fn builder() -> crate::client::builder::ArkClientBuilder {
        crate::client::builder::ArkClientBuilder::new()
    }

    /// Create a client that talks HTTP to `config.base_url()`.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(
            config.base_url(),
            config.api_key(),
            config.request_timeout(),
        )?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub(crate) fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn CompletionTransport>,
    ) -> Self {
        let policy = RetryPolicy {
            max_retries: config.max_retries(),
            backoff: Backoff::new(config.retry_delay()).with_ceiling(config.max_retry_delay()),
        };
        Self {
            config,
            policy,
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Execute one logical chat completion.
    ///
    /// Runs up to `max_retries + 1` sequential attempts. Retryable faults wait
    /// `retry_delay * 2^attempt` before the next one; a terminal fault or the
    /// last attempt ends the loop and the last fault is translated into an
    /// [`Error`].
    pub async fn chat_completion(&self, request: &CompletionRequest) -> Result<CompletionResponse> {
        if request.wants_stream() {
            return Err(Error::validation_with_context(
                "streaming responses are not supported",
                ErrorContext::new()
                    .with_field_path("request.stream")
                    .with_source("chat_completion"),
            ));
        }

        let max_attempts = self.config.total_attempts();
        let mut last_fault: Option<TransportFault> = None;

        for attempt in 0..=self.policy.max_retries {
            match self.transport.send(request).await {
                Ok(response) => {
                    if attempt > 0 {
                        info!(
                            attempt = attempt + 1,
                            max_attempts,
                            model = request.model.as_str(),
                            "ark chat completion succeeded after retry"
                        );
                    }
                    return Ok(response);
                }
                Err(fault) => {
                    warn!(
                        attempt = attempt + 1,
                        max_attempts,
                        message = fault.message.as_str(),
                        code = fault.code.as_deref().unwrap_or(""),
                        status = ?fault.status(),
                        data = ?fault.payload,
                        "ark chat completion attempt failed"
                    );

                    let decision = self.policy.decide(&fault, attempt);
                    last_fault = Some(fault);

                    match decision {
                        Decision::Retry { delay } => {
                            info!(
                                delay_ms = delay.as_millis() as u64,
                                next_attempt = attempt + 2,
                                "waiting before retry"
                            );
                            tokio::time::sleep(delay).await;
                        }
                        Decision::Fail => break,
                    }
                }
            }
        }

        Err(last_fault.map(Error::from_fault).unwrap_or(Error::Unknown))
    }
}

impl fmt::Debug for ArkClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArkClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
