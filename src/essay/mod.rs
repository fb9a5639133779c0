//! 申论生成接口：`POST /api/generate-essay`。
//!
//! # Essay Endpoint
//!
//! Turns a topic into a generation prompt, calls the shared [`ArkClient`], and
//! maps failures onto HTTP statuses by [`ErrorKind`](crate::ErrorKind).
//!
//! | Condition | Status |
//! |-----------|--------|
//! | non-POST | 405 |
//! | unparsable body / missing topic | 400 |
//! | API key not configured | 500 |
//! | invalid key / rate limited / bad params | 401 / 429 / 400 |
//! | anything else | 500 |

pub mod prompt;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

use crate::client::{ArkClient, ClientCell, GenerateOptions, ProvisionOptions};
use crate::error_code::ErrorKind;
use crate::types::TokenUsage;
use crate::Error;
use prompt::{build_prompt, count_chars, max_tokens_for, EssayType, DEFAULT_WORD_COUNT};

pub const ESSAY_TEMPERATURE: f64 = 0.7;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    api_key: Option<String>,
    model: String,
    options: ProvisionOptions,
    clients: Arc<ClientCell>,
}

impl AppState {
    /// `api_key` of `None` (or blank) makes every generation request fail with 500
    /// before any network call.
    pub fn new(api_key: Option<String>, options: ProvisionOptions) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: crate::models::DEEPSEEK_R1.to_string(),
            options,
            clients: Arc::new(ClientCell::new()),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn client(&self, api_key: &str) -> crate::Result<Arc<ArkClient>> {
        self.clients
            .provision_resolved(|| self.options.clone().into_config(api_key))
    }
}

/// Routes of the essay service.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/generate-essay", post(generate_essay))
        .route("/health", get(health))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EssayRequest {
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub essay_type: Option<EssayType>,
    #[serde(default)]
    pub word_count: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EssayResponse {
    pub success: bool,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    pub word_count: usize,
    pub generated_at: String,
    pub usage: TokenUsage,
}

/// Error answer of the essay endpoint: a status plus a short message.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<&Error> for ApiError {
    fn from(err: &Error) -> Self {
        let kind = err.kind();
        let status = StatusCode::from_u16(kind.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let message = match kind {
            ErrorKind::InvalidApiKey => "Invalid API key".to_string(),
            ErrorKind::RateLimited => "Rate limit exceeded, please try again later".to_string(),
            ErrorKind::InvalidRequest => "Invalid request parameters".to_string(),
            ErrorKind::ServerError => "Internal server error".to_string(),
            _ => err.to_string(),
        };
        Self { status, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({ "success": false, "error": self.message })),
        )
            .into_response()
    }
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

pub async fn generate_essay(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<EssayResponse>, ApiError> {
    let req: EssayRequest = serde_json::from_slice(&body)
        .map_err(|_| ApiError::new(StatusCode::BAD_REQUEST, "Invalid request body"))?;

    let topic = req
        .topic
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::new(StatusCode::BAD_REQUEST, "Topic is required"))?;

    let api_key = state.api_key.as_deref().ok_or_else(|| {
        ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "ARK_API_KEY not configured",
        )
    })?;

    let essay_type = req.essay_type.unwrap_or_default();
    let word_count = req.word_count.unwrap_or(DEFAULT_WORD_COUNT);

    let client = state.client(api_key).map_err(|e| {
        error!(error = %e, "failed to provision ark client");
        ApiError::from(&e)
    })?;

    let options = GenerateOptions::new()
        .temperature(ESSAY_TEMPERATURE)
        .max_tokens(max_tokens_for(word_count));
    let prompt = build_prompt(topic, essay_type, word_count);

    let result = client
        .generate_text(&state.model, &prompt, &options)
        .await
        .map_err(|e| {
            error!(
                error_kind = e.kind().name(),
                error = %e,
                "essay generation failed"
            );
            ApiError::from(&e)
        })?;

    let chars = count_chars(&result.content);
    info!(
        essay_type = essay_type.label(),
        word_count = chars,
        total_tokens = result.usage.total_tokens,
        "essay generated"
    );

    Ok(Json(EssayResponse {
        success: true,
        word_count: chars,
        generated_at: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        content: result.content,
        reasoning: result.reasoning,
        usage: result.usage,
    }))
}
