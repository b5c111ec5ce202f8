//! Response mapping for upstream failures.
//!
//! # Responsibilities
//! - Map upstream failure classes to client-facing HTTP statuses
//! - Keep error bodies in a uniform JSON shape: {"detail": ...}
//!
//! # Design Decisions
//! - Upstream 400 and 429 pass through with their own statuses
//! - Other upstream statuses propagate as-is with a capped body
//! - Transport failures surface as 502 Bad Gateway

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::upstream::UpstreamError;

/// Error type returned by route handlers.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] UpstreamError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self.0 {
            UpstreamError::BadRequest(body) => {
                (StatusCode::BAD_REQUEST, format!("Bad request: {body}"))
            }
            UpstreamError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "Rate limit exceeded. Please try again later.".to_string(),
            ),
            UpstreamError::Status { status, body } => {
                (status, format!("Unexpected upstream error: {body}"))
            }
            UpstreamError::Transport(_) => (
                StatusCode::BAD_GATEWAY,
                "Upstream request failed".to_string(),
            ),
            UpstreamError::InvalidBody(_) => (
                StatusCode::BAD_GATEWAY,
                "Upstream returned an invalid response".to_string(),
            ),
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
