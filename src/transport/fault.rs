//! Structured description of a failed transport attempt.
//!
//! Faults are built once, at the transport boundary, and consumed afterwards only
//! through [`FaultKind`] and the accessors below.

use std::error::Error as StdError;
use std::fmt;
use std::io;

/// What went wrong on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultKind {
    ConnectionReset,
    HostNotFound,
    ConnectionRefused,
    TimedOut,
    /// The server answered with a non-success status.
    HttpStatus(u16),
    Other,
}

impl FaultKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ConnectionReset => "connection_reset",
            Self::HostNotFound => "host_not_found",
            Self::ConnectionRefused => "connection_refused",
            Self::TimedOut => "timed_out",
            Self::HttpStatus(_) => "http_status",
            Self::Other => "other",
        }
    }

    /// True for faults raised before any HTTP response was received.
    pub fn is_connection_fault(&self) -> bool {
        matches!(
            self,
            Self::ConnectionReset | Self::HostNotFound | Self::ConnectionRefused | Self::TimedOut
        )
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HttpStatus(status) => write!(f, "http_status({})", status),
            other => f.write_str(other.name()),
        }
    }
}

/// A single failed attempt.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct TransportFault {
    pub kind: FaultKind,
    pub message: String,
    /// Provider error code (`error.code`) or a transport-level code name.
    pub code: Option<String>,
    /// Parsed JSON body of an error response, when there was one.
    pub payload: Option<serde_json::Value>,
}

impl TransportFault {
    pub fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            code: None,
            payload: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Fault for a non-success HTTP response.
    ///
    /// A JSON body is kept as payload; its OpenAI-style `error.message` and
    /// `error.code` are lifted into the fault.
    pub fn from_status(status: u16, body: &str) -> Self {
        let payload: Option<serde_json::Value> = serde_json::from_str(body).ok();
        let error = payload.as_ref().and_then(|p| p.get("error"));
        let detail = error
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
            .map(|s| s.to_string());
        let code = error.and_then(|e| e.get("code")).and_then(|c| match c {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        });

        let message = match &detail {
            Some(d) => format!("HTTP {}: {}", status, d),
            None if body.trim().is_empty() => format!("HTTP {}", status),
            None => format!("HTTP {}: {}", status, truncate(body.trim(), 200)),
        };

        Self {
            kind: FaultKind::HttpStatus(status),
            message,
            code,
            payload,
        }
    }

    /// Fault for an error raised by reqwest before a response body was read.
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        let message = error_chain(err);
        let kind = if err.is_timeout() {
            FaultKind::TimedOut
        } else {
            io_fault_kind(err)
                .or_else(|| text_fault_kind(&message))
                .unwrap_or(FaultKind::Other)
        };
        let fault = Self::new(kind, message);
        match kind {
            FaultKind::Other | FaultKind::HttpStatus(_) => fault,
            k => fault.with_code(k.name()),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self.kind {
            FaultKind::HttpStatus(s) => Some(s),
            _ => None,
        }
    }

    /// Server-provided `error.message`, if the response carried one.
    pub fn server_detail(&self) -> Option<&str> {
        self.payload
            .as_ref()?
            .get("error")?
            .get("message")?
            .as_str()
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max_chars).collect();
        out.push_str("...");
        out
    }
}

/// Joins an error and all of its sources into one line.
fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = err.source();
    while let Some(e) = source {
        let s = e.to_string();
        if !parts.iter().any(|p| p.contains(&s)) {
            parts.push(s);
        }
        source = e.source();
    }
    parts.join(": ")
}

fn io_fault_kind(err: &(dyn StdError + 'static)) -> Option<FaultKind> {
    let mut source: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(e) = source {
        if let Some(io_err) = e.downcast_ref::<io::Error>() {
            match io_err.kind() {
                io::ErrorKind::ConnectionReset
                | io::ErrorKind::ConnectionAborted
                | io::ErrorKind::BrokenPipe => return Some(FaultKind::ConnectionReset),
                io::ErrorKind::ConnectionRefused => return Some(FaultKind::ConnectionRefused),
                io::ErrorKind::TimedOut => return Some(FaultKind::TimedOut),
                _ => {}
            }
        }
        source = e.source();
    }
    None
}

// Resolver failures are not surfaced as a distinct io::ErrorKind by hyper.
fn text_fault_kind(message: &str) -> Option<FaultKind> {
    let m = message.to_lowercase();
    if m.contains("connection refused") {
        Some(FaultKind::ConnectionRefused)
    } else if m.contains("connection reset") {
        Some(FaultKind::ConnectionReset)
    } else if m.contains("dns error")
        || m.contains("failed to lookup address")
        || m.contains("name or service not known")
        || m.contains("no such host")
    {
        Some(FaultKind::HostNotFound)
    } else if m.contains("timed out") {
        Some(FaultKind::TimedOut)
    } else {
        None
    }
}
