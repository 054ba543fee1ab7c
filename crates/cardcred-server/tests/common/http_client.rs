//! HTTP client helpers for tests.

use serde_json::Value;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(DEFAULT_TIMEOUT_SECS);
const STATUS_HEADER: &str = "x-cardcred-status";

pub struct TestClient {
    client: reqwest::Client,
    base_url: String,
}

/// Status code, `x-cardcred-status` header and JSON body.
#[derive(Debug)]
pub struct TestResponse {
    pub status: u16,
    pub cardcred_status: String,
    pub body: Value,
}

impl TestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{}", self.base_url, path)
    }

    async fn into_test_response(resp: reqwest::Response) -> Result<TestResponse, reqwest::Error> {
        let status = resp.status().as_u16();
        let cardcred_status = resp
            .headers()
            .get(STATUS_HEADER)
            .and_then(|h| h.to_str().ok())
            .unwrap_or("unknown")
            .to_string();
        let body = resp.json().await?;

        Ok(TestResponse {
            status,
            cardcred_status,
            body,
        })
    }

    pub async fn get(&self, path: &str) -> Result<TestResponse, reqwest::Error> {
        let resp = self.client.get(self.url(path)).send().await?;
        Self::into_test_response(resp).await
    }

    pub async fn post(&self, path: &str, body: Value) -> Result<TestResponse, reqwest::Error> {
        let resp = self
            .client
            .post(self.url(path))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;
        Self::into_test_response(resp).await
    }
}
