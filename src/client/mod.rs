//! 客户端模块：带重试与指数退避的聊天补全客户端。
//!
//! # Client Module
//!
//! | Item | Description |
//! |------|-------------|
//! | [`ArkClient`] | Retrying chat-completion client and text-generation facade |
//! | [`ArkClientBuilder`] | Configuration with env fallbacks and validation |
//! | [`ClientCell`] / [`create_ark_client`] | Once-per-process shared client |
//! | [`classify`] | Retryable vs terminal decision for a failed attempt |
//! | [`Backoff`] | `base * 2^attempt` delay schedule |

mod builder;
mod chat;
mod config;
mod core;
mod error_classification;
mod policy;
mod provision;

pub use builder::ArkClientBuilder;
pub use chat::{build_generation_request, GenerateOptions, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
pub use config::{
    ClientConfig, DEFAULT_BASE_URL, DEFAULT_MAX_RETRIES, DEFAULT_REQUEST_TIMEOUT,
    DEFAULT_RETRY_DELAY,
};
pub use self::core::ArkClient;
pub use error_classification::{classify, Retryability, RETRYABLE_HTTP_STATUSES};
pub use policy::Backoff;
pub use provision::{create_ark_client, shared_client, ClientCell, ProvisionOptions};
