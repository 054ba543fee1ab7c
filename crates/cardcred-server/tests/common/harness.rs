//! Test server harness.

use axum::{Json, Router, http::StatusCode, routing::post};
use cardcred::config::Config;
use cardcred::service::ScoringService;
use cardcred_server::gateway::{AppState, create_router_with_state};
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const STARTUP_WAIT_TIMEOUT_SECS: u64 = 5;
const STARTUP_POLL_INTERVAL_MS: u64 = 50;
const TEST_API_KEY: &str = "pplx-test-key";

#[derive(Debug, Clone)]
pub struct TestServerConfig {
    pub api_key: Option<String>,
    /// Answer text the fake completion API returns.
    pub api_answer: String,
    pub api_citations: Vec<String>,
    /// Status the fake completion API answers with.
    pub api_status: u16,
    pub dry_run: bool,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            api_key: Some(TEST_API_KEY.to_string()),
            api_answer: "Score: 8/10 — strong provenance".to_string(),
            api_citations: Vec::new(),
            api_status: 200,
            dry_run: true,
        }
    }
}

impl TestServerConfig {
    pub fn answering(answer: impl Into<String>) -> Self {
        Self {
            api_answer: answer.into(),
            ..Self::default()
        }
    }

    pub fn without_key() -> Self {
        Self {
            api_key: None,
            ..Self::default()
        }
    }
}

/// Running gateway plus the fake completion API behind it.
pub struct TestServer {
    pub addr: SocketAddr,
    api_hits: Arc<AtomicUsize>,
    _server_handle: JoinHandle<()>,
    _api_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Requests that reached the fake completion API.
    pub fn api_hits(&self) -> usize {
        self.api_hits.load(Ordering::SeqCst)
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub async fn wait_for_server_ready(
    addr: SocketAddr,
    timeout: Duration,
    interval: Duration,
) -> Result<(), ServerStartupError> {
    let start = std::time::Instant::now();

    loop {
        if start.elapsed() > timeout {
            return Err(ServerStartupError::Timeout);
        }

        match tokio::net::TcpStream::connect(addr).await {
            Ok(_) => return Ok(()),
            Err(_) => {
                tokio::time::sleep(interval).await;
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerStartupError {
    #[error("Server failed to start within timeout")]
    Timeout,
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
    #[error("Server startup failed: {0}")]
    StartupFailed(String),
}

async fn spawn_fake_api(
    config: &TestServerConfig,
    hits: Arc<AtomicUsize>,
) -> Result<(String, JoinHandle<()>), ServerStartupError> {
    let status = StatusCode::from_u16(config.api_status)
        .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;
    let body = serde_json::json!({
        "id": "test",
        "model": "sonar-pro",
        "choices": [{
            "index": 0,
            "finish_reason": "stop",
            "message": {"role": "assistant", "content": config.api_answer},
        }],
        "citations": config.api_citations,
    });

    let app = Router::new().route(
        "/chat/completions",
        post(move || {
            let body = body.clone();
            let hits = Arc::clone(&hits);
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                (status, Json(body))
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Ok((format!("http://{}", addr), handle))
}

/// Spawns the gateway wired to a real `PerplexityClient` that talks to a
/// local fake completion API. Pages are synthetic unless `dry_run` is off.
pub async fn spawn_test_server(config: TestServerConfig) -> Result<TestServer, ServerStartupError> {
    let api_hits = Arc::new(AtomicUsize::new(0));
    let (api_base_url, api_handle) = spawn_fake_api(&config, Arc::clone(&api_hits)).await?;

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let local_addr = listener.local_addr()?;

    let app_config = Config {
        api_key: config.api_key.clone(),
        api_base_url,
        request_timeout: Duration::from_secs(5),
        fetch_timeout: Duration::from_secs(2),
        dry_run: config.dry_run,
        port: local_addr.port(),
        ..Config::default()
    };

    let service = ScoringService::from_config(&app_config)
        .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;
    let app = create_router_with_state(AppState::new(service, &app_config));

    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    wait_for_server_ready(
        local_addr,
        Duration::from_secs(STARTUP_WAIT_TIMEOUT_SECS),
        Duration::from_millis(STARTUP_POLL_INTERVAL_MS),
    )
    .await?;

    Ok(TestServer {
        addr: local_addr,
        api_hits,
        _server_handle: server_handle,
        _api_handle: api_handle,
        shutdown_tx: Some(shutdown_tx),
    })
}
