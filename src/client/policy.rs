use std::time::Duration;

use super::error_classification::{classify, Retryability};
use crate::transport::TransportFault;

/// Exponential backoff: `base * 2^attempt`.
///
/// No jitter. The ceiling is optional and off by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    base: Duration,
    ceiling: Option<Duration>,
}

impl Backoff {
    pub fn new(base: Duration) -> Self {
        Self {
            base,
            ceiling: None,
        }
    }

    pub fn with_ceiling(mut self, ceiling: Option<Duration>) -> Self {
        self.ceiling = ceiling;
        self
    }

    pub fn base(&self) -> Duration {
        self.base
    }

    /// Wait before the attempt following zero-based `attempt`.
    pub fn delay(&self, attempt: u32) -> Duration {
        let base_ms = self.base.as_millis().min(u64::MAX as u128) as u64;
        let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
        let delay = Duration::from_millis(base_ms.saturating_mul(factor));
        match self.ceiling {
            Some(cap) => delay.min(cap),
            None => delay,
        }
    }
}

/// Internal decision for how to proceed after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Decision {
    Retry { delay: Duration },
    Fail,
}

/// Retry budget plus backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RetryPolicy {
    pub max_retries: u32,
    pub backoff: Backoff,
}

impl RetryPolicy {
    /// Decide what to do next after an attempt failed.
    ///
    /// `attempt` is 0-based (first failure => attempt=0).
    pub fn decide(&self, fault: &TransportFault, attempt: u32) -> Decision {
        if attempt >= self.max_retries || classify(fault) == Retryability::Terminal {
            return Decision::Fail;
        }
        Decision::Retry {
            delay: self.backoff.delay(attempt),
        }
    }
}
