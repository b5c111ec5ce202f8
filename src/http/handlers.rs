//! Route handlers.
//!
//! Each handler builds the upstream endpoint, issues the call through the
//! shared client, and shapes the payload (pair truncation) before replying.
//! Failure mapping lives in response.rs; handlers only bubble errors up.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::upstream::chains::SUPPORTED_CHAINS;
use crate::upstream::pairs::{clamp_limit, truncate_pairs};
use crate::upstream::period::to_upstream_period;

/// Query parameters for routes that only page their results.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub limit: Option<usize>,
}

/// Query parameters for routes filterable by chain.
#[derive(Debug, Deserialize)]
pub struct ChainQuery {
    pub chain: Option<String>,
    pub limit: Option<usize>,
}

/// Query parameters for gainers/losers routes.
#[derive(Debug, Deserialize)]
pub struct MoversQuery {
    pub chain: Option<String>,
    #[serde(default = "default_period")]
    pub period: String,
    pub limit: Option<usize>,
}

fn default_period() -> String {
    "1d".to_string()
}

/// Query parameters for free-text search.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: String,
    pub limit: Option<usize>,
}

/// GET /: liveness and version.
pub async fn home() -> Json<Value> {
    Json(json!({
        "message": "DexScreener gateway is running",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /pairs/token/{token_address}: pairs matching a token address.
pub async fn pairs_by_token(
    State(state): State<AppState>,
    Path(token_address): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Value>, ApiError> {
    fetch_pairs(&state, "/dex/search", &[("q", &token_address)], query.limit).await
}

/// GET /pairs/dex/{dex_id}/{token_address}: pairs for a DEX and token.
pub async fn pairs_by_dex_and_token(
    State(state): State<AppState>,
    Path((dex_id, token_address)): Path<(String, String)>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Value>, ApiError> {
    let endpoint = format!("/dex/pairs/{dex_id}/{token_address}");
    fetch_pairs(&state, &endpoint, &[], query.limit).await
}

/// GET /pairs/dex/{dex_id}: all pairs for a DEX.
pub async fn pairs_by_dex(
    State(state): State<AppState>,
    Path(dex_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Value>, ApiError> {
    let endpoint = format!("/dex/pairs/{dex_id}");
    fetch_pairs(&state, &endpoint, &[], query.limit).await
}

/// GET /pairs/address/{pair_address}: one pair, passed through untouched.
pub async fn pair_by_address(
    State(state): State<AppState>,
    Path(pair_address): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let endpoint = format!("/dex/pairs/{pair_address}");
    let payload = state.client.get(&endpoint, &[]).await?;
    Ok(Json(payload))
}

/// GET /pairs/trending: trending pairs, optionally per chain.
pub async fn trending_pairs(
    State(state): State<AppState>,
    Query(query): Query<ChainQuery>,
) -> Result<Json<Value>, ApiError> {
    let endpoint = match &query.chain {
        Some(chain) => format!("/dex/pairs/trending/{chain}"),
        None => "/dex/pairs/trending".to_string(),
    };
    fetch_pairs(&state, &endpoint, &[], query.limit).await
}

/// GET /search: pairs by token name or symbol.
pub async fn search_pairs(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Value>, ApiError> {
    fetch_pairs(&state, "/dex/search", &[("q", &query.query)], query.limit).await
}

/// GET /pairs/gainers: top gaining pairs for a period.
pub async fn top_gainers(
    State(state): State<AppState>,
    Query(query): Query<MoversQuery>,
) -> Result<Json<Value>, ApiError> {
    movers(&state, "gainers", query).await
}

/// GET /pairs/losers: top losing pairs for a period.
pub async fn top_losers(
    State(state): State<AppState>,
    Query(query): Query<MoversQuery>,
) -> Result<Json<Value>, ApiError> {
    movers(&state, "losers", query).await
}

/// GET /chains: chains the gateway knows about.
pub async fn list_chains() -> Json<Value> {
    Json(json!({ "chains": SUPPORTED_CHAINS }))
}

async fn movers(
    state: &AppState,
    direction: &str,
    query: MoversQuery,
) -> Result<Json<Value>, ApiError> {
    let period = to_upstream_period(&query.period);
    let endpoint = match &query.chain {
        Some(chain) => format!("/dex/{direction}/{period}/{chain}"),
        None => format!("/dex/{direction}/{period}"),
    };
    fetch_pairs(state, &endpoint, &[], query.limit).await
}

async fn fetch_pairs(
    state: &AppState,
    endpoint: &str,
    params: &[(&str, &str)],
    limit: Option<usize>,
) -> Result<Json<Value>, ApiError> {
    let mut payload = state.client.get(endpoint, params).await?;
    truncate_pairs(&mut payload, clamp_limit(limit, &state.limits));
    Ok(Json(payload))
}
