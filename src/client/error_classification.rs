//! Error classification logic

use crate::transport::TransportFault;

/// HTTP statuses worth another attempt.
pub const RETRYABLE_HTTP_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retryability {
    Retryable,
    Terminal,
}

/// Decide whether a failed attempt may be retried.
///
/// Rules, first match wins:
/// 1. connection reset / host not found / refused / timed out
/// 2. status in [`RETRYABLE_HTTP_STATUSES`]
/// 3. a non-HTTP fault whose message contains "timeout" (case-sensitive)
/// 4. anything else is terminal
pub fn classify(fault: &TransportFault) -> Retryability {
    if fault.kind.is_connection_fault() {
        return Retryability::Retryable;
    }

    // A status answer is judged by its status alone; the body text may mention anything.
    if let Some(status) = fault.status() {
        return if RETRYABLE_HTTP_STATUSES.contains(&status) {
            Retryability::Retryable
        } else {
            Retryability::Terminal
        };
    }

    if fault.message.contains("timeout") {
        return Retryability::Retryable;
    }

    Retryability::Terminal
}
