//! Retry logic for upstream calls.
//!
//! # Responsibilities
//! - Determine if an upstream failure is retryable
//! - Enforce retry budget (fraction of observed traffic)
//!
//! # Design Decisions
//! - The gateway only issues GET requests upstream, so idempotency
//!   is a given; retryability is decided on failure class alone
//! - Transport errors always retryable; 502/503/504 retryable
//! - Jittered backoff (backoff.rs) prevents thundering herd
//! - Retry budget prevents retry storms under load

use reqwest::StatusCode;
use std::sync::atomic::{AtomicU64, Ordering};

/// Sliding retry budget.
///
/// Tracks total requests and retries issued; a retry is allowed while
/// `retries < requests * ratio`. A minimum reserve keeps retries available
/// during low traffic.
pub struct RetryBudget {
    ratio: f32,
    min_reserve: u64,
    requests: AtomicU64,
    retries: AtomicU64,
}

impl RetryBudget {
    pub fn new(ratio: f32, min_reserve: u64) -> Self {
        Self {
            ratio,
            min_reserve,
            requests: AtomicU64::new(0),
            retries: AtomicU64::new(0),
        }
    }

    /// Record an incoming request against the budget.
    pub fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Check whether a retry is currently within budget, and claim it.
    pub fn can_retry(&self) -> bool {
        let requests = self.requests.load(Ordering::Relaxed);
        let retries = self.retries.load(Ordering::Relaxed);

        let allowance = ((requests as f64) * (self.ratio as f64)) as u64;
        if retries < allowance.max(self.min_reserve) {
            self.retries.fetch_add(1, Ordering::Relaxed);
            true
        } else {
            false
        }
    }
}

/// Decide whether a failed upstream attempt should be retried.
///
/// `status` is `None` for transport-level failures (connect, timeout).
pub fn is_retryable(status: Option<StatusCode>, transport_error: bool) -> bool {
    if transport_error {
        return true;
    }
    matches!(
        status,
        Some(StatusCode::BAD_GATEWAY)
            | Some(StatusCode::SERVICE_UNAVAILABLE)
            | Some(StatusCode::GATEWAY_TIMEOUT)
    )
}
