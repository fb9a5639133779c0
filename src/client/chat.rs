use crate::types::{ChatMessage, CompletionRequest, CompletionResponse, GenerationResult};
use crate::{Error, Result};
use tracing::error;

use super::core::ArkClient;

pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 2000;

/// Options for [`ArkClient::generate_text`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateOptions {
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
    pub system_prompt: Option<String>,
}

impl GenerateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set temperature (default 0.7).
    pub fn temperature(mut self, temp: f64) -> Self {
        self.temperature = Some(temp);
        self
    }

    /// Set max tokens (default 2000).
    pub fn max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Prepend a system message. An empty prompt is ignored.
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }
}

/// Build the single-turn request sent by [`ArkClient::generate_text`].
pub fn build_generation_request(
    model: &str,
    prompt: &str,
    options: &GenerateOptions,
) -> CompletionRequest {
    let mut messages = Vec::with_capacity(2);
    if let Some(system) = options.system_prompt.as_deref().filter(|s| !s.is_empty()) {
        messages.push(ChatMessage::system(system));
    }
    messages.push(ChatMessage::user(prompt));

    CompletionRequest::new(model, messages)
        .temperature(options.temperature.unwrap_or(DEFAULT_TEMPERATURE))
        .max_tokens(options.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS))
}

/// Validate the first choice and reshape it.
fn into_generation_result(response: CompletionResponse) -> Result<GenerationResult> {
    let usage = response.usage.into();
    let message = response
        .choices
        .into_iter()
        .next()
        .map(|c| c.message)
        .ok_or(Error::EmptyContent)?;

    match message.content {
        Some(content) if !content.is_empty() => Ok(GenerationResult {
            content,
            reasoning: message.reasoning_content,
            usage,
        }),
        _ => Err(Error::EmptyContent),
    }
}

impl ArkClient {
    /// Generate text from a single prompt.
    ///
    /// Sends an optional system message followed by one user message, then
    /// returns the first choice's content, its reasoning (if any) and usage.
    /// A missing or empty content fails with [`Error::EmptyContent`].
    pub async fn generate_text(
        &self,
        model: &str,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<GenerationResult> {
        let request = build_generation_request(model, prompt, options);
        let outcome = self
            .chat_completion(&request)
            .await
            .and_then(into_generation_result);
        if let Err(e) = &outcome {
            error!(
                model,
                error_kind = e.kind().name(),
                error = %e,
                "generate text failed"
            );
        }
        outcome
    }
}
