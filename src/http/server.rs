//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID, metrics, concurrency limit)
//! - Bind server to listener
//! - Run until a shutdown signal arrives

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{MatchedPath, Request};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{GatewayConfig, LimitsConfig};
use crate::http::handlers;
use crate::http::request::RequestIdLayer;
use crate::lifecycle::signals;
use crate::observability::metrics;
use crate::upstream::ScreenerClient;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<ScreenerClient>,
    pub limits: LimitsConfig,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, reqwest::Error> {
        let client = Arc::new(ScreenerClient::new(&config)?);
        let state = AppState {
            client,
            limits: config.limits.clone(),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(handlers::home))
            .route("/search", get(handlers::search_pairs))
            .route("/chains", get(handlers::list_chains))
            .route("/pairs/token/{token_address}", get(handlers::pairs_by_token))
            .route("/pairs/dex/{dex_id}", get(handlers::pairs_by_dex))
            .route(
                "/pairs/dex/{dex_id}/{token_address}",
                get(handlers::pairs_by_dex_and_token),
            )
            .route(
                "/pairs/address/{pair_address}",
                get(handlers::pair_by_address),
            )
            .route("/pairs/trending", get(handlers::trending_pairs))
            .route("/pairs/gainers", get(handlers::top_gainers))
            .route("/pairs/losers", get(handlers::top_losers))
            .route_layer(middleware::from_fn(track_metrics))
            .with_state(state)
            .layer(TimeoutLayer::with_status_code(
                StatusCode::GATEWAY_TIMEOUT,
                Duration::from_secs(config.timeouts.request_secs),
            ))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
            // Request-level backpressure; permits release on response completion.
            .layer(GlobalConcurrencyLimitLayer::new(
                config.listener.max_connections,
            ))
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Returns when a shutdown signal (SIGINT/SIGTERM) arrives or the
    /// supplied shutdown channel fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = signals::shutdown_signal() => {}
                    _ = shutdown.recv() => {
                        tracing::info!("shutdown requested");
                    }
                }
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Record per-route request metrics.
async fn track_metrics(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());
    let method = request.method().to_string();

    let response = next.run(request).await;

    metrics::record_request(&method, &route, response.status().as_u16(), start);
    response
}
