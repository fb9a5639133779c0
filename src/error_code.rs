//! 错误类别：客户端向调用方暴露的结构化错误种类。
//!
//! Structured error kinds.
//!
//! Every [`Error`](crate::Error) maps to exactly one [`ErrorKind`]. Callers at an
//! inbound boundary (e.g. the essay endpoint) switch on the kind instead of on
//! message text.
//!
//! ## Error Code Categories
//!
//! | Prefix | Category      | Description                          |
//! |--------|---------------|--------------------------------------|
//! | E1xxx  | client        | Request-side errors (key, params)    |
//! | E2xxx  | rate          | Rate limiting                        |
//! | E3xxx  | server        | Provider-side HTTP errors            |
//! | E5xxx  | network       | Transport faults before any response |
//! | E6xxx  | local         | Validation and configuration         |
//! | E9xxx  | unknown       | Catch-all                            |
//!
//! ## Example
//!
//! ```rust
//! use ark_client::ErrorKind;
//!
//! let kind = ErrorKind::RateLimited;
//! assert_eq!(kind.code(), "E2001");
//! assert_eq!(kind.http_status(), 429);
//! assert_eq!(kind.category(), "rate");
//! ```

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// E1001: Provider rejected the request parameters (HTTP 400)
    InvalidRequest,
    /// E1002: Invalid or missing API key (HTTP 401)
    InvalidApiKey,
    /// E2001: Request rate limit exceeded (HTTP 429)
    RateLimited,
    /// E3001: Internal server error on provider side (HTTP 500)
    ServerError,
    /// E3002: Any other non-success HTTP status
    ApiStatus,
    /// E5001: Connection reset by peer
    ConnectionReset,
    /// E5002: Server host name could not be resolved
    HostNotFound,
    /// E5003: Server refused the connection
    ConnectionRefused,
    /// E5004: Connection or response timed out
    TimedOut,
    /// E5099: Other transport failure
    Network,
    /// E6001: Provider returned no usable content
    EmptyContent,
    /// E6002: Request rejected locally before any network call
    Validation,
    /// E6003: Client is misconfigured (missing key, bad URL)
    Configuration,
    /// E9999: No error was recorded
    Unknown,
}

impl ErrorKind {
    /// Returns the canonical code string (e.g., `"E1002"`).
    #[inline]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "E1001",
            Self::InvalidApiKey => "E1002",
            Self::RateLimited => "E2001",
            Self::ServerError => "E3001",
            Self::ApiStatus => "E3002",
            Self::ConnectionReset => "E5001",
            Self::HostNotFound => "E5002",
            Self::ConnectionRefused => "E5003",
            Self::TimedOut => "E5004",
            Self::Network => "E5099",
            Self::EmptyContent => "E6001",
            Self::Validation => "E6002",
            Self::Configuration => "E6003",
            Self::Unknown => "E9999",
        }
    }

    /// Returns the snake_case name (e.g., `"invalid_api_key"`).
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::InvalidApiKey => "invalid_api_key",
            Self::RateLimited => "rate_limited",
            Self::ServerError => "server_error",
            Self::ApiStatus => "api_status",
            Self::ConnectionReset => "connection_reset",
            Self::HostNotFound => "host_not_found",
            Self::ConnectionRefused => "connection_refused",
            Self::TimedOut => "timed_out",
            Self::Network => "network",
            Self::EmptyContent => "empty_content",
            Self::Validation => "validation",
            Self::Configuration => "configuration",
            Self::Unknown => "unknown",
        }
    }

    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidRequest | Self::InvalidApiKey => "client",
            Self::RateLimited => "rate",
            Self::ServerError | Self::ApiStatus => "server",
            Self::ConnectionReset
            | Self::HostNotFound
            | Self::ConnectionRefused
            | Self::TimedOut
            | Self::Network => "network",
            Self::EmptyContent | Self::Validation | Self::Configuration => "local",
            Self::Unknown => "unknown",
        }
    }

    /// HTTP status an inbound handler should answer with for this kind.
    ///
    /// Only the four provider faults with a direct client-side meaning get their
    /// own status; everything else is reported as 500.
    #[inline]
    pub fn http_status(&self) -> u16 {
        match self {
            Self::InvalidApiKey => 401,
            Self::RateLimited => 429,
            Self::InvalidRequest => 400,
            _ => 500,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
