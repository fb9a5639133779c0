//! # ark-client
//!
//! 方舟（Ark）大模型接口的容错客户端，以及基于它的申论生成接口。
//!
//! Resilient client for the Ark chat-completion API, plus a small essay
//! generation endpoint built on top of it.
//!
//! ## Overview
//!
//! - **Retrying client**: [`ArkClient::chat_completion`] runs up to
//!   `max_retries + 1` sequential attempts with exponential backoff
//!   (`retry_delay * 2^attempt`), retrying only transient faults.
//! - **Classified errors**: every failure surfaces as one [`Error`] whose
//!   [`ErrorKind`] callers can switch on.
//! - **Text generation**: [`ArkClient::generate_text`] wraps a prompt into a
//!   system?+user request and returns a simplified [`GenerationResult`].
//! - **Shared instance**: [`ClientCell`] / [`create_ark_client`] provide one
//!   client per process, configured once.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ark_client::{ArkClient, GenerateOptions};
//!
//! #[tokio::main]
//! async fn main() -> ark_client::Result<()> {
//!     let client = ArkClient::builder().api_key("your-api-key").build()?;
//!
//!     let result = client
//!         .generate_text(
//!             ark_client::models::DEEPSEEK_R1,
//!             "Write a haiku about retries",
//!             &GenerateOptions::new().system_prompt("You are a poet."),
//!         )
//!         .await?;
//!     println!("{} ({} tokens)", result.content, result.usage.total_tokens);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Client, builder, retry policy, provisioning |
//! | [`transport`] | Single-attempt HTTP transport and fault mapping |
//! | [`types`] | Request/response wire types |
//! | [`essay`] | `POST /api/generate-essay` handler |
//! | [`models`] | Predefined model identifiers |

pub mod client;
pub mod essay;
pub mod models;
pub mod transport;
pub mod types;

pub mod error_code;

// Re-export main types for convenience
pub use client::{
    create_ark_client, ArkClient, ArkClientBuilder, ClientCell, ClientConfig, GenerateOptions,
    ProvisionOptions,
};
pub use error_code::ErrorKind;
pub use types::{
    ChatMessage, CompletionRequest, CompletionResponse, GenerationResult, MessageRole, TokenUsage,
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
