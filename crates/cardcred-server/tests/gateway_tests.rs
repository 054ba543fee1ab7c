mod common;

use cardcred_server::health::{check_health, health_check_url};
use common::harness::{TestServerConfig, spawn_test_server};
use common::http_client::TestClient;
use serde_json::json;

#[tokio::test]
async fn test_health_and_ready() {
    let server = spawn_test_server(TestServerConfig::default()).await.unwrap();
    let client = TestClient::new(server.url());

    let health = client.get("/healthz").await.unwrap();
    assert_eq!(health.status, 200);
    assert_eq!(health.cardcred_status, "healthy");

    let ready = client.get("/ready").await.unwrap();
    assert_eq!(ready.status, 200);
    assert_eq!(ready.body["components"]["api_key"], "ready");

    server.shutdown().await;
}

#[tokio::test]
async fn test_ready_without_key() {
    let server = spawn_test_server(TestServerConfig::without_key()).await.unwrap();
    let client = TestClient::new(server.url());

    let ready = client.get("/ready").await.unwrap();
    assert_eq!(ready.status, 503);
    assert_eq!(ready.cardcred_status, "not_ready");
}

#[tokio::test]
async fn test_score_end_to_end() {
    let server = spawn_test_server(TestServerConfig::default()).await.unwrap();
    let client = TestClient::new(server.url());

    let resp = client
        .post("/v1/score", json!({"description": "Card X, mint condition"}))
        .await
        .unwrap();

    assert_eq!(resp.status, 200);
    assert_eq!(resp.cardcred_status, "SCORED");
    assert_eq!(resp.body["score"], 8.0);
    assert_eq!(resp.body["rationale"], "strong provenance");
    assert_eq!(server.api_hits(), 1);
}

#[tokio::test]
async fn test_score_missing_key_never_reaches_api() {
    let server = spawn_test_server(TestServerConfig::without_key()).await.unwrap();
    let client = TestClient::new(server.url());

    let resp = client
        .post("/v1/score", json!({"description": "Card X, mint condition"}))
        .await
        .unwrap();

    assert_eq!(resp.status, 401);
    assert_eq!(resp.body["code"], 401);
    assert_eq!(server.api_hits(), 0);
}

#[tokio::test]
async fn test_score_malformed_answer_is_502() {
    let server = spawn_test_server(TestServerConfig::answering("I think it is real."))
        .await
        .unwrap();
    let client = TestClient::new(server.url());

    let resp = client
        .post("/v1/score", json!({"description": "Card X"}))
        .await
        .unwrap();

    assert_eq!(resp.status, 502);
    assert_eq!(resp.cardcred_status, "upstream_error");
}

#[tokio::test]
async fn test_score_rejected_key_is_401() {
    let config = TestServerConfig {
        api_status: 401,
        ..TestServerConfig::default()
    };
    let server = spawn_test_server(config).await.unwrap();
    let client = TestClient::new(server.url());

    let resp = client
        .post("/v1/score", json!({"description": "Card X"}))
        .await
        .unwrap();

    assert_eq!(resp.status, 401);
    assert_eq!(server.api_hits(), 1);
}

#[tokio::test]
async fn test_search_end_to_end_dry_run() {
    let config = TestServerConfig {
        api_answer: "Listings: https://www.ebay.com/itm/42, http://example.org/saka".to_string(),
        api_citations: vec!["https://www.goldin.co/item/7".to_string()],
        ..TestServerConfig::default()
    };
    let server = spawn_test_server(config).await.unwrap();
    let client = TestClient::new(server.url());

    let resp = client
        .post("/v1/search", json!({"player": "Bukayo Saka", "max_urls": 10}))
        .await
        .unwrap();

    assert_eq!(resp.status, 200);
    assert_eq!(resp.cardcred_status, "RANKED");
    assert_eq!(resp.body["note"], "Found 3 URLs for Bukayo Saka.");

    let rows = resp.body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    let scores: Vec<f64> = rows.iter().map(|r| r["score"].as_f64().unwrap()).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(rows[0]["host"], "www.ebay.com");
}

#[tokio::test]
async fn test_credibility_endpoint() {
    let server = spawn_test_server(TestServerConfig::default()).await.unwrap();
    let client = TestClient::new(server.url());

    let resp = client
        .post("/v1/credibility", json!({"url": "https://www.comc.com/Cards/1"}))
        .await
        .unwrap();

    assert_eq!(resp.status, 200);
    assert_eq!(resp.cardcred_status, "ok");
    assert_eq!(resp.body["meta"]["host"], "www.comc.com");
    assert_eq!(resp.body["meta"]["version"], "d3-0.1");
    assert_eq!(server.api_hits(), 0);
}

#[tokio::test]
async fn test_health_check_passes_against_running_server() {
    let server = spawn_test_server(TestServerConfig::default()).await.unwrap();

    let url = health_check_url(Some(&server.addr.port().to_string()));
    assert_eq!(check_health(&url).await, 0);
}

#[tokio::test]
async fn test_health_check_fails_when_nothing_listens() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    assert_eq!(check_health(&health_check_url(Some(&port.to_string()))).await, 1);
}

async fn run_health_check_binary(port: u16) -> Option<i32> {
    tokio::process::Command::new(env!("CARGO_BIN_EXE_cardcred"))
        .arg("--health-check")
        .env("CARDCRED_PORT", port.to_string())
        .status()
        .await
        .unwrap()
        .code()
}

#[tokio::test]
async fn test_binary_health_check_flag_exit_codes() {
    let server = spawn_test_server(TestServerConfig::default()).await.unwrap();
    assert_eq!(run_health_check_binary(server.addr.port()).await, Some(0));

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let unused_port = listener.local_addr().unwrap().port();
    drop(listener);
    assert_eq!(run_health_check_binary(unused_port).await, Some(1));
}
