use crate::error_code::ErrorKind;
use crate::transport::{FaultKind, TransportFault};
use thiserror::Error;

/// Structured error context for configuration and validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field path or configuration key that caused the error (e.g., "config.base_url", "request.stream")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected type, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g., "client_builder", "chat_completion")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Detail used when the provider gave no `error.message`.
const NO_DETAIL: &str = "unknown error";

/// Unified error type for the Ark client.
///
/// Provider and transport failures arrive here already classified; the
/// display text is the human-readable message surfaced to callers.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid API key")]
    InvalidApiKey,

    #[error("rate limited, retry later")]
    RateLimited,

    #[error("invalid request parameters: {detail}")]
    InvalidRequest { detail: String },

    #[error("internal server error")]
    ServerError,

    #[error("API call failed ({status}): {detail}")]
    Api { status: u16, detail: String },

    #[error("network connection was reset, check the network or retry later")]
    ConnectionReset,

    #[error("could not resolve the server address, check the network")]
    HostNotFound,

    #[error("server refused the connection, check the server status")]
    ConnectionRefused,

    #[error("connection timed out, check the network or retry later")]
    TimedOut,

    #[error("network error: {message}")]
    Network { message: String },

    #[error("API returned empty content")]
    EmptyContent,

    #[error("Validation error: {message}{}", format_context(.context))]
    Validation {
        message: String,
        context: ErrorContext,
    },

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("unknown error")]
    Unknown,
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    /// Create a new validation error with structured context
    pub fn validation_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Validation {
            message: msg.into(),
            context,
        }
    }

    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::configuration_with_context(msg, ErrorContext::new())
    }

    /// Translate the last observed fault of an exhausted (or terminal) call.
    ///
    /// HTTP status wins over the transport kind; without a status the
    /// connection-level kind picks a dedicated variant.
    pub fn from_fault(fault: TransportFault) -> Self {
        if let Some(status) = fault.status() {
            let detail = fault.server_detail().unwrap_or(NO_DETAIL).to_string();
            return match status {
                401 => Error::InvalidApiKey,
                429 => Error::RateLimited,
                400 => Error::InvalidRequest { detail },
                500 => Error::ServerError,
                _ => Error::Api { status, detail },
            };
        }

        match fault.kind {
            FaultKind::ConnectionReset => Error::ConnectionReset,
            FaultKind::HostNotFound => Error::HostNotFound,
            FaultKind::ConnectionRefused => Error::ConnectionRefused,
            FaultKind::TimedOut => Error::TimedOut,
            FaultKind::HttpStatus(_) | FaultKind::Other => Error::Network {
                message: fault.message,
            },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidApiKey => ErrorKind::InvalidApiKey,
            Error::RateLimited => ErrorKind::RateLimited,
            Error::InvalidRequest { .. } => ErrorKind::InvalidRequest,
            Error::ServerError => ErrorKind::ServerError,
            Error::Api { .. } => ErrorKind::ApiStatus,
            Error::ConnectionReset => ErrorKind::ConnectionReset,
            Error::HostNotFound => ErrorKind::HostNotFound,
            Error::ConnectionRefused => ErrorKind::ConnectionRefused,
            Error::TimedOut => ErrorKind::TimedOut,
            Error::Network { .. } => ErrorKind::Network,
            Error::EmptyContent => ErrorKind::EmptyContent,
            Error::Validation { .. } => ErrorKind::Validation,
            Error::Configuration { .. } => ErrorKind::Configuration,
            Error::Unknown => ErrorKind::Unknown,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. } | Error::Validation { context, .. } => {
                Some(context)
            }
            _ => None,
        }
    }
}
