//! Integration tests for the gateway routes against a mock upstream.

use std::time::{Duration, Instant};

use httpmock::prelude::*;
use serde_json::{json, Value};

mod common;

fn pairs_payload(count: usize) -> Value {
    let pairs: Vec<Value> = (0..count)
        .map(|i| json!({"pairAddress": format!("0x{i:040x}"), "dexId": "uniswap"}))
        .collect();
    json!({"schemaVersion": "1.0.0", "pairs": pairs})
}

#[tokio::test]
async fn home_reports_running() {
    let gateway = common::start_gateway("http://127.0.0.1:1", |_| {}).await;

    let body: Value = reqwest::get(gateway.url("/"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["message"], "DexScreener gateway is running");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));

    gateway.shutdown.trigger();
}

#[tokio::test]
async fn chains_route_is_static() {
    let gateway = common::start_gateway("http://127.0.0.1:1", |_| {}).await;

    let body: Value = reqwest::get(gateway.url("/chains"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let chains = body["chains"].as_array().unwrap();
    assert_eq!(chains.len(), 24);
    assert!(chains.contains(&json!("ethereum")));
    assert!(chains.contains(&json!("solana")));

    gateway.shutdown.trigger();
}

#[tokio::test]
async fn pairs_by_token_searches_and_truncates() {
    let upstream = MockServer::start_async().await;
    let mock = upstream
        .mock_async(|when, then| {
            when.method(GET).path("/dex/search").query_param("q", "0xabc");
            then.status(200).json_body(pairs_payload(5));
        })
        .await;

    let gateway = common::start_gateway(&upstream.base_url(), |_| {}).await;

    let body: Value = reqwest::get(gateway.url("/pairs/token/0xabc?limit=2"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(body["pairs"].as_array().unwrap().len(), 2);
    assert_eq!(body["schemaVersion"], "1.0.0");

    gateway.shutdown.trigger();
}

#[tokio::test]
async fn default_limit_applies_when_omitted() {
    let upstream = MockServer::start_async().await;
    upstream
        .mock_async(|when, then| {
            when.method(GET).path("/dex/pairs/uniswap");
            then.status(200).json_body(pairs_payload(15));
        })
        .await;

    let gateway = common::start_gateway(&upstream.base_url(), |_| {}).await;

    let body: Value = reqwest::get(gateway.url("/pairs/dex/uniswap"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["pairs"].as_array().unwrap().len(), 10);

    gateway.shutdown.trigger();
}

#[tokio::test]
async fn limit_is_capped_at_configured_maximum() {
    let upstream = MockServer::start_async().await;
    upstream
        .mock_async(|when, then| {
            when.method(GET).path("/dex/pairs/uniswap/0xabc");
            then.status(200).json_body(pairs_payload(8));
        })
        .await;

    let gateway = common::start_gateway(&upstream.base_url(), |config| {
        config.limits.max_page_size = 3;
    })
    .await;

    let body: Value = reqwest::get(gateway.url("/pairs/dex/uniswap/0xabc?limit=50"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["pairs"].as_array().unwrap().len(), 3);

    gateway.shutdown.trigger();
}

#[tokio::test]
async fn pair_by_address_passes_payload_through() {
    let upstream = MockServer::start_async().await;
    upstream
        .mock_async(|when, then| {
            when.method(GET).path("/dex/pairs/0xdead");
            then.status(200).json_body(pairs_payload(15));
        })
        .await;

    let gateway = common::start_gateway(&upstream.base_url(), |_| {}).await;

    let body: Value = reqwest::get(gateway.url("/pairs/address/0xdead"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // No limit shaping on the single-pair route.
    assert_eq!(body["pairs"].as_array().unwrap().len(), 15);

    gateway.shutdown.trigger();
}

#[tokio::test]
async fn trending_includes_chain_segment() {
    let upstream = MockServer::start_async().await;
    let mock = upstream
        .mock_async(|when, then| {
            when.method(GET).path("/dex/pairs/trending/bsc");
            then.status(200).json_body(pairs_payload(2));
        })
        .await;

    let gateway = common::start_gateway(&upstream.base_url(), |_| {}).await;

    let response = reqwest::get(gateway.url("/pairs/trending?chain=bsc"))
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    mock.assert_async().await;

    gateway.shutdown.trigger();
}

#[tokio::test]
async fn search_maps_query_to_upstream() {
    let upstream = MockServer::start_async().await;
    let mock = upstream
        .mock_async(|when, then| {
            when.method(GET).path("/dex/search").query_param("q", "PEPE");
            then.status(200).json_body(pairs_payload(1));
        })
        .await;

    let gateway = common::start_gateway(&upstream.base_url(), |_| {}).await;

    let response = reqwest::get(gateway.url("/search?query=PEPE")).await.unwrap();
    assert_eq!(response.status(), 200);
    mock.assert_async().await;

    gateway.shutdown.trigger();
}

#[tokio::test]
async fn search_without_query_is_rejected() {
    let gateway = common::start_gateway("http://127.0.0.1:1", |_| {}).await;

    let response = reqwest::get(gateway.url("/search")).await.unwrap();
    assert_eq!(response.status(), 400);

    gateway.shutdown.trigger();
}

#[tokio::test]
async fn gainers_period_is_translated() {
    let upstream = MockServer::start_async().await;
    let mock = upstream
        .mock_async(|when, then| {
            when.method(GET).path("/dex/gainers/d7");
            then.status(200).json_body(pairs_payload(2));
        })
        .await;

    let gateway = common::start_gateway(&upstream.base_url(), |_| {}).await;

    let response = reqwest::get(gateway.url("/pairs/gainers?period=7d"))
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    mock.assert_async().await;

    gateway.shutdown.trigger();
}

#[tokio::test]
async fn losers_default_period_is_daily_with_chain() {
    let upstream = MockServer::start_async().await;
    let mock = upstream
        .mock_async(|when, then| {
            when.method(GET).path("/dex/losers/h24/ethereum");
            then.status(200).json_body(pairs_payload(2));
        })
        .await;

    let gateway = common::start_gateway(&upstream.base_url(), |_| {}).await;

    let response = reqwest::get(gateway.url("/pairs/losers?chain=ethereum"))
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    mock.assert_async().await;

    gateway.shutdown.trigger();
}

#[tokio::test]
async fn upstream_bad_request_propagates() {
    let upstream = MockServer::start_async().await;
    upstream
        .mock_async(|when, then| {
            when.method(GET).path("/dex/pairs/nope");
            then.status(400).body("unknown dex");
        })
        .await;

    let gateway = common::start_gateway(&upstream.base_url(), |_| {}).await;

    let response = reqwest::get(gateway.url("/pairs/dex/nope")).await.unwrap();
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.unwrap();
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.contains("unknown dex"), "detail was: {detail}");

    gateway.shutdown.trigger();
}

#[tokio::test]
async fn upstream_rate_limit_propagates() {
    let upstream = MockServer::start_async().await;
    upstream
        .mock_async(|when, then| {
            when.method(GET).path("/dex/search");
            then.status(429).body("slow down");
        })
        .await;

    let gateway = common::start_gateway(&upstream.base_url(), |_| {}).await;

    let response = reqwest::get(gateway.url("/search?query=PEPE")).await.unwrap();
    assert_eq!(response.status(), 429);

    gateway.shutdown.trigger();
}

#[tokio::test]
async fn unexpected_upstream_status_passes_through() {
    let upstream = MockServer::start_async().await;
    upstream
        .mock_async(|when, then| {
            when.method(GET).path("/dex/pairs/uniswap");
            then.status(500).body("boom");
        })
        .await;

    let gateway = common::start_gateway(&upstream.base_url(), |_| {}).await;

    let response = reqwest::get(gateway.url("/pairs/dex/uniswap")).await.unwrap();
    assert_eq!(response.status(), 500);

    gateway.shutdown.trigger();
}

#[tokio::test]
async fn unreachable_upstream_is_bad_gateway() {
    // Grab a port that nothing listens on.
    let unused = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead_addr = unused.local_addr().unwrap();
    drop(unused);

    let gateway = common::start_gateway(&format!("http://{dead_addr}"), |_| {}).await;

    let response = reqwest::get(gateway.url("/pairs/dex/uniswap")).await.unwrap();
    assert_eq!(response.status(), 502);

    gateway.shutdown.trigger();
}

#[tokio::test]
async fn connection_limit_serializes_requests() {
    let upstream_addr = common::start_programmable_upstream(|| async {
        tokio::time::sleep(Duration::from_millis(250)).await;
        (200, r#"{"schemaVersion":"1.0.0","pairs":[]}"#.to_string())
    })
    .await;

    let gateway = common::start_gateway(&format!("http://{upstream_addr}"), |config| {
        config.listener.max_connections = 1;
    })
    .await;

    let start = Instant::now();
    let (first, second) = tokio::join!(
        reqwest::get(gateway.url("/pairs/dex/uniswap")),
        reqwest::get(gateway.url("/pairs/dex/uniswap")),
    );
    assert_eq!(first.unwrap().status(), 200);
    assert_eq!(second.unwrap().status(), 200);

    // With a single permit the second request cannot overlap the first.
    let elapsed = start.elapsed();
    assert!(
        elapsed >= Duration::from_millis(450),
        "requests overlapped under a one-permit limit: {elapsed:?}"
    );

    gateway.shutdown.trigger();
}

#[tokio::test]
async fn port_conflict_fails_startup_bind() {
    let first = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = first.local_addr().unwrap();

    // The second bind is the path main() takes; it must error out.
    let second = tokio::net::TcpListener::bind(addr).await;
    assert!(second.is_err());
}
