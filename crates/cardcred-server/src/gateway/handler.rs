use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::{debug, info, instrument};

use cardcred::client::CompletionClient;
use cardcred::scoring::ScoreRequest;

use crate::gateway::error::GatewayError;
use crate::gateway::state::AppState;
use crate::gateway::status::{CARDCRED_STATUS_HEADER, CardcredStatus};

#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    pub player: String,
    #[serde(default)]
    pub max_urls: Option<usize>,
    #[serde(default)]
    pub dry_run: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CredibilityRequest {
    pub url: String,
    #[serde(default)]
    pub dry_run: Option<bool>,
}

/// Decodes the raw body so malformed JSON and a missing content type still
/// get the gateway's error envelope.
fn parse_body<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, GatewayError> {
    serde_json::from_slice(body).map_err(|e| match e.classify() {
        serde_json::error::Category::Data => {
            GatewayError::InvalidRequest(format!("Invalid request schema: {}", e))
        }
        _ => GatewayError::InvalidRequest(format!("Invalid JSON body: {}", e)),
    })
}

fn make_response(status_value: &str, body: impl serde::Serialize) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        CARDCRED_STATUS_HEADER,
        HeaderValue::from_str(status_value).unwrap_or(HeaderValue::from_static("error")),
    );
    (StatusCode::OK, headers, Json(body)).into_response()
}

#[instrument(skip(state, body))]
pub async fn score_handler<C>(
    State(state): State<AppState<C>>,
    body: Bytes,
) -> Result<Response, GatewayError>
where
    C: CompletionClient + 'static,
{
    let request: ScoreRequest = parse_body(&body)?;
    debug!(description_len = request.description.len(), "Scoring card");

    let result = state.service.score_card(&request).await?;
    info!(score = result.score, scale = result.scale, "Card scored");

    Ok(make_response(CardcredStatus::Scored.as_header_value(), result))
}

#[instrument(skip(state, body), fields(player = tracing::field::Empty))]
pub async fn search_handler<C>(
    State(state): State<AppState<C>>,
    body: Bytes,
) -> Result<Response, GatewayError>
where
    C: CompletionClient + 'static,
{
    let request: SearchRequest = parse_body(&body)?;
    tracing::Span::current().record("player", tracing::field::display(request.player.trim()));

    let outcome = state
        .service
        .search(
            &request.player,
            request.max_urls.unwrap_or(state.default_max_urls),
            request.dry_run.unwrap_or(state.default_dry_run),
        )
        .await?;

    let status = if outcome.rows.is_empty() {
        CardcredStatus::NoResults
    } else {
        CardcredStatus::Ranked
    };

    Ok(make_response(status.as_header_value(), outcome))
}

#[instrument(skip(state, body), fields(url = tracing::field::Empty))]
pub async fn credibility_handler<C>(
    State(state): State<AppState<C>>,
    body: Bytes,
) -> Result<Response, GatewayError>
where
    C: CompletionClient + 'static,
{
    let request: CredibilityRequest = parse_body(&body)?;
    tracing::Span::current().record("url", tracing::field::display(&request.url));

    let report = state
        .service
        .score_url(&request.url, request.dry_run.unwrap_or(state.default_dry_run))
        .await;

    Ok(make_response(report.status.as_str(), report))
}
