use thiserror::Error;

use crate::client::{AuthError, ClientError};

/// Errors from scoring a card description.
#[derive(Debug, Error)]
pub enum ScoringError {
    /// API key missing or rejected.
    #[error("authentication failed: {0}")]
    Auth(AuthError),

    /// Completion request failed in transport or with a non-auth status.
    #[error("network error: {0}")]
    Network(ClientError),

    /// Reply held no usable score.
    #[error("could not parse score from response: {reason}")]
    Parse {
        /// Why parsing failed.
        reason: String,
        /// The text that was parsed (empty when the body was not JSON).
        response: String,
    },

    /// Request rejected before any call was made.
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// What was wrong with the request.
        reason: String,
    },
}

impl ScoringError {
    pub(crate) fn parse(reason: impl Into<String>, response: &str) -> Self {
        ScoringError::Parse {
            reason: reason.into(),
            response: response.to_string(),
        }
    }
}

impl From<ClientError> for ScoringError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Auth(auth) => ScoringError::Auth(auth),
            ClientError::MalformedResponse { message } => ScoringError::Parse {
                reason: message,
                response: String::new(),
            },
            ClientError::InvalidRequest { message } => {
                ScoringError::InvalidInput { reason: message }
            }
            network @ ClientError::Network { .. } => ScoringError::Network(network),
        }
    }
}
