use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use cardcred::service::ServiceError;

use crate::gateway::status::CARDCRED_STATUS_HEADER;

/// Errors returned by gateway handlers, rendered as `{error, code}`.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Body was not valid JSON, did not match the schema, or failed validation (400).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// API key missing or rejected (401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Completion API failed or sent an unusable reply (502).
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Anything else (500).
    #[error("internal error: {0}")]
    InternalError(String),
}

impl From<ServiceError> for GatewayError {
    fn from(err: ServiceError) -> Self {
        if err.is_invalid_input() {
            GatewayError::InvalidRequest(err.to_string())
        } else if err.is_auth() {
            GatewayError::Unauthorized(err.to_string())
        } else if err.is_upstream() {
            GatewayError::Upstream(err.to_string())
        } else {
            GatewayError::InternalError(err.to_string())
        }
    }
}

/// JSON error body.
#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, cardcred_status) = match &self {
            GatewayError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            GatewayError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "auth_error"),
            GatewayError::Upstream(_) => (StatusCode::BAD_GATEWAY, "upstream_error"),
            GatewayError::InternalError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            CARDCRED_STATUS_HEADER,
            HeaderValue::from_str(cardcred_status).unwrap_or(HeaderValue::from_static("error")),
        );

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, headers, body).into_response()
    }
}
