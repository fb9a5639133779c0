//! 传输层：单次请求的执行与故障归类。
//!
//! Transport layer: executes exactly one completion attempt and maps whatever
//! went wrong into a [`TransportFault`].

mod fault;
mod http;

pub use fault::{FaultKind, TransportFault};
pub use http::HttpTransport;

use crate::types::{CompletionRequest, CompletionResponse};
use async_trait::async_trait;

/// One attempt at a chat completion.
///
/// Implementations must not retry; retry policy lives in [`ArkClient`](crate::ArkClient).
#[async_trait]
pub trait CompletionTransport: Send + Sync {
    async fn send(
        &self,
        request: &CompletionRequest,
    ) -> std::result::Result<CompletionResponse, TransportFault>;
}
