//! DexScreener REST client.
//!
//! # Responsibilities
//! - Issue GET requests against the configured upstream base URL
//! - Enforce connect/request timeouts
//! - Retry transient failures with jittered backoff, within budget
//! - Classify upstream failures for the response layer
//!
//! # Design Decisions
//! - Payloads stay untyped (serde_json::Value); the gateway shapes, it
//!   does not model, the upstream schema
//! - Error bodies are capped before they reach clients or logs

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;

use crate::config::{GatewayConfig, RetryConfig};
use crate::resilience::{calculate_backoff, is_retryable, RetryBudget};

/// Longest upstream error body echoed back to clients.
const MAX_ERROR_BODY: usize = 200;

/// Failure classes surfaced by the upstream client.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// Upstream rejected the request as malformed (HTTP 400).
    #[error("upstream rejected request: {0}")]
    BadRequest(String),

    /// Upstream rate limit hit (HTTP 429).
    #[error("upstream rate limit exceeded")]
    RateLimited,

    /// Any other non-success status from upstream.
    #[error("unexpected upstream status {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// Transport-level failure (connect, timeout, protocol).
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream returned a 200 with a body that is not JSON.
    #[error("upstream returned invalid JSON: {0}")]
    InvalidBody(reqwest::Error),
}

/// HTTP client for the DexScreener REST API.
pub struct ScreenerClient {
    http: reqwest::Client,
    base_url: String,
    retry: RetryConfig,
    budget: Arc<RetryBudget>,
}

impl ScreenerClient {
    /// Build a client from gateway configuration.
    pub fn new(config: &GatewayConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.upstream.base_url.trim_end_matches('/').to_string(),
            retry: config.retries.clone(),
            budget: Arc::new(RetryBudget::new(config.retries.budget_ratio, 100)),
        })
    }

    /// Issue a GET against `endpoint` (path below the base URL) and decode
    /// the JSON payload. Transient failures are retried with backoff while
    /// the retry budget allows.
    pub async fn get(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<Value, UpstreamError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let max_attempts = if self.retry.enabled {
            self.retry.max_attempts
        } else {
            1
        };

        self.budget.record_request();
        let mut attempts = 0;

        loop {
            attempts += 1;
            tracing::debug!(url = %url, attempt = attempts, "upstream request");

            let result = self.http.get(&url).query(params).send().await;

            match result {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        return response.json().await.map_err(UpstreamError::InvalidBody);
                    }

                    if attempts < max_attempts
                        && is_retryable(Some(status), false)
                        && self.budget.can_retry()
                    {
                        let delay = calculate_backoff(
                            attempts,
                            self.retry.base_delay_ms,
                            self.retry.max_delay_ms,
                        );
                        tracing::info!(
                            url = %url,
                            status = %status,
                            attempt = attempts,
                            delay = ?delay,
                            "retrying upstream request"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }

                    let body = response.text().await.unwrap_or_default();
                    let body = truncate_body(&body);
                    tracing::warn!(url = %url, status = %status, body = %body, "upstream error status");

                    return Err(match status {
                        StatusCode::BAD_REQUEST => UpstreamError::BadRequest(body),
                        StatusCode::TOO_MANY_REQUESTS => UpstreamError::RateLimited,
                        _ => UpstreamError::Status { status, body },
                    });
                }
                Err(e) => {
                    tracing::error!(url = %url, attempt = attempts, error = %e, "upstream transport error");

                    if attempts < max_attempts
                        && is_retryable(None, true)
                        && self.budget.can_retry()
                    {
                        let delay = calculate_backoff(
                            attempts,
                            self.retry.base_delay_ms,
                            self.retry.max_delay_ms,
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }

                    return Err(UpstreamError::Transport(e));
                }
            }
        }
    }
}

fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY {
        return body.to_string();
    }
    // Cut on a char boundary; error bodies are advisory text.
    let mut end = MAX_ERROR_BODY;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    body[..end].to_string()
}
