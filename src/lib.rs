//! DexScreener API Gateway
//!
//! A small HTTP service built with Tokio and Axum that fronts the public
//! DexScreener REST API with stable, paged routes.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │                   GATEWAY                     │
//!                        │                                               │
//!     Client Request     │  ┌─────────┐    ┌──────────┐    ┌─────────┐  │
//!     ───────────────────┼─▶│  http   │───▶│ handlers │───▶│upstream │──┼──▶ DexScreener
//!                        │  │ server  │    │          │    │ client  │  │     REST API
//!                        │  └─────────┘    └──────────┘    └────┬────┘  │
//!                        │                                      │       │
//!     Client Response    │  ┌─────────┐    ┌──────────┐         │       │
//!     ◀──────────────────┼──│response │◀───│  pairs   │◀────────┘       │
//!                        │  │ mapping │    │ shaping  │                 │
//!                        │  └─────────┘    └──────────┘                 │
//!                        │                                               │
//!                        │  ┌─────────────────────────────────────────┐ │
//!                        │  │           Cross-Cutting Concerns         │ │
//!                        │  │  ┌────────┐ ┌──────────┐ ┌────────────┐ │ │
//!                        │  │  │ config │ │resilience│ │observability│ │ │
//!                        │  │  └────────┘ └──────────┘ └────────────┘ │ │
//!                        │  │  ┌─────────────────────────────────────┐│ │
//!                        │  │  │      lifecycle (startup/shutdown)    ││ │
//!                        │  │  └─────────────────────────────────────┘│ │
//!                        │  └─────────────────────────────────────────┘ │
//!                        └──────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod config;
pub mod http;
pub mod upstream;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;
pub mod resilience;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
