use thiserror::Error;

use crate::client::ClientError;
use crate::config::ConfigError;
use crate::credibility::FetchError;
use crate::discovery::DiscoveryError;
use crate::scoring::ScoringError;

/// Shown when discovery is requested without a configured key.
pub const MISSING_KEY_NOTE: &str = "Missing PERPLEXITY_API_KEY. Add a secret named \
PERPLEXITY_API_KEY to the server environment (e.g. Settings → Variables and secrets) and restart.";

/// Shown when a search is submitted without a player name.
pub const EMPTY_PLAYER_NOTE: &str = "Please enter a player name.";

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("player name cannot be empty")]
    EmptyPlayer,

    #[error("PERPLEXITY_API_KEY is not configured")]
    MissingKey,

    #[error("{0}")]
    Scoring(#[from] ScoringError),

    #[error("{0}")]
    Discovery(#[from] DiscoveryError),

    #[error("failed to initialize completion client: {0}")]
    Client(#[from] ClientError),

    #[error("failed to initialize page fetcher: {0}")]
    Fetcher(#[from] FetchError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ServiceError {
    /// Message shown to the person who submitted the request.
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::EmptyPlayer => EMPTY_PLAYER_NOTE.to_string(),
            ServiceError::MissingKey => MISSING_KEY_NOTE.to_string(),
            other => format!("Error: {}", other),
        }
    }

    /// Caller supplied something unusable.
    pub fn is_invalid_input(&self) -> bool {
        match self {
            ServiceError::EmptyPlayer => true,
            ServiceError::Scoring(ScoringError::InvalidInput { .. }) => true,
            ServiceError::Discovery(DiscoveryError::InvalidInput { .. }) => true,
            ServiceError::Discovery(DiscoveryError::Client(ClientError::InvalidRequest {
                ..
            })) => true,
            _ => false,
        }
    }

    /// Missing or rejected credentials.
    pub fn is_auth(&self) -> bool {
        match self {
            ServiceError::MissingKey => true,
            ServiceError::Scoring(ScoringError::Auth(_)) => true,
            ServiceError::Discovery(e) => e.is_auth(),
            _ => false,
        }
    }

    /// The completion API was unreachable, failed, or answered with
    /// something we could not use.
    pub fn is_upstream(&self) -> bool {
        match self {
            ServiceError::Scoring(ScoringError::Network(_) | ScoringError::Parse { .. }) => true,
            ServiceError::Discovery(DiscoveryError::Client(
                ClientError::Network { .. } | ClientError::MalformedResponse { .. },
            )) => true,
            _ => false,
        }
    }
}
