//! Upstream DexScreener integration.
//!
//! # Data Flow
//! ```text
//! handler builds endpoint + params
//!     → client.rs (GET with timeouts, retries, failure classification)
//!     → pairs.rs (truncate `pairs` to the clamped limit)
//!     → JSON payload back to the handler
//! ```
//!
//! # Design Decisions
//! - One client instance shared across handlers (connection pooling)
//! - period.rs owns the client-facing → upstream period code mapping
//! - chains.rs is static data; the upstream has no chains endpoint

pub mod chains;
pub mod client;
pub mod pairs;
pub mod period;

pub use client::{ScreenerClient, UpstreamError};
