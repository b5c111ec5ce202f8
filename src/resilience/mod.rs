//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to upstream:
//!     → reqwest timeouts (enforce connect/request deadline)
//!     → On failure: retries.rs (check if retryable, consult budget)
//!     → backoff.rs (jittered exponential delay before next attempt)
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every upstream call has a deadline
//! - Retries only for transient failures (transport errors, 502/503/504)
//! - All retry state lives in the upstream client; handlers stay oblivious

pub mod backoff;
pub mod retries;

pub use backoff::calculate_backoff;
pub use retries::{is_retryable, RetryBudget};
