//! HTTP gateway (Axum) exposing card scoring and source search as JSON.
//!
//! This module is primarily used by the `cardcred` server binary.

pub mod error;
pub mod handler;
pub mod state;
pub mod status;


use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use cardcred::client::CompletionClient;

pub use error::GatewayError;
pub use handler::{credibility_handler, score_handler, search_handler};
pub use state::AppState;
pub use status::{
    CARDCRED_STATUS_ERROR, CARDCRED_STATUS_HEADER, CARDCRED_STATUS_HEALTHY,
    CARDCRED_STATUS_NOT_READY, CARDCRED_STATUS_READY, CardcredStatus,
};

pub fn create_router_with_state<C>(state: AppState<C>) -> Router
where
    C: CompletionClient + 'static,
{
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler::<C>))
        .route("/v1/score", post(score_handler::<C>))
        .route("/v1/search", post(search_handler::<C>))
        .route("/v1/credibility", post(credibility_handler::<C>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
}

#[derive(serde::Serialize)]
pub struct ComponentStatus {
    pub http: &'static str,
    pub api_key: &'static str,
    pub page_mode: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        CARDCRED_STATUS_HEADER,
        HeaderValue::from_static(CARDCRED_STATUS_HEALTHY),
    );

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}

/// Ready once a key is configured; dry runs still need discovery.
#[tracing::instrument(skip(state))]
pub async fn ready_handler<C>(State(state): State<AppState<C>>) -> Response
where
    C: CompletionClient + 'static,
{
    let api_key_status = if state.service.has_api_key() {
        CARDCRED_STATUS_READY
    } else {
        CARDCRED_STATUS_ERROR
    };

    let components = ComponentStatus {
        http: CARDCRED_STATUS_READY,
        api_key: api_key_status,
        page_mode: if state.default_dry_run { "synthetic" } else { "live" },
    };

    let is_ready = components.api_key == CARDCRED_STATUS_READY;

    let (status_code, status_msg, header) = if is_ready {
        (StatusCode::OK, "ok", CARDCRED_STATUS_READY)
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            "pending",
            CARDCRED_STATUS_NOT_READY,
        )
    };

    let mut headers = HeaderMap::new();
    headers.insert(CARDCRED_STATUS_HEADER, HeaderValue::from_static(header));

    (
        status_code,
        headers,
        Json(ReadyResponse {
            status: status_msg,
            components,
        }),
    )
        .into_response()
}
