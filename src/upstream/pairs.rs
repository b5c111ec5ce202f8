//! Pair list shaping applied to upstream payloads.
//!
//! # Responsibilities
//! - Clamp the client-supplied `limit` into configured bounds
//! - Truncate the `pairs` array of an upstream payload in place
//!
//! # Design Decisions
//! - Upstream payloads are untyped (serde_json::Value); the gateway only
//!   touches the one field it shapes and passes everything else through
//! - Payloads without a `pairs` array are returned untouched

use serde_json::Value;

use crate::config::LimitsConfig;

/// Resolve the effective page size for a request.
pub fn clamp_limit(requested: Option<usize>, limits: &LimitsConfig) -> usize {
    requested
        .unwrap_or(limits.default_page_size)
        .min(limits.max_page_size)
}

/// Truncate the `pairs` array of an upstream payload to `limit` entries.
pub fn truncate_pairs(payload: &mut Value, limit: usize) {
    if let Some(pairs) = payload.get_mut("pairs").and_then(Value::as_array_mut) {
        pairs.truncate(limit);
    }
}
