//! 类型模块：聊天补全接口的请求、响应与结果类型。
//!
//! # Types Module
//!
//! Strongly-typed representations of the chat-completion wire format and of the
//! simplified result handed back by the text-generation facade.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ChatMessage`] | Chat message with role and content |
//! | [`CompletionRequest`] | Body of `POST /chat/completions` |
//! | [`CompletionResponse`] | Provider response (choices + usage) |
//! | [`GenerationResult`] | Facade output: content, reasoning, usage |
//!
//! ## Example
//!
//! ```rust
//! use ark_client::types::{ChatMessage, CompletionRequest};
//!
//! let request = CompletionRequest::new(
//!     "deepseek-r1-250528",
//!     vec![ChatMessage::system("You are terse."), ChatMessage::user("Hello")],
//! )
//! .temperature(0.7)
//! .max_tokens(2000);
//! assert_eq!(request.messages.len(), 2);
//! ```

pub mod completion;
pub mod message;

pub use completion::{
    Choice, CompletionRequest, CompletionResponse, GenerationResult, ResponseMessage, TokenUsage,
    Usage,
};
pub use message::{ChatMessage, MessageRole};
