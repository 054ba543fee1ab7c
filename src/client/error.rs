use thiserror::Error;

/// Credential failures. Raised before any request when the key is missing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No key (or a blank one) was configured.
    #[error("missing API key: set the PERPLEXITY_API_KEY secret")]
    MissingKey,

    /// The API answered 401/403.
    #[error("API key rejected (HTTP {status})")]
    Rejected {
        /// HTTP status returned by the API.
        status: u16,
    },
}

#[derive(Debug, Clone, Error)]
/// Errors returned by completion API calls.
pub enum ClientError {
    /// Missing or invalid credential.
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// Transport failure, timeout or non-success HTTP status.
    #[error("network error calling '{url}': {message}")]
    Network {
        /// Endpoint URL.
        url: String,
        /// HTTP status, when the server answered.
        status: Option<u16>,
        /// Error message.
        message: String,
    },

    /// The response body was not the JSON shape the API documents.
    #[error("malformed API response: {message}")]
    MalformedResponse {
        /// Error message.
        message: String,
    },

    /// The request could not be built (e.g. empty prompt).
    #[error("invalid request: {message}")]
    InvalidRequest {
        /// Error message.
        message: String,
    },
}

impl ClientError {
    /// Returns `true` for credential failures.
    pub fn is_auth(&self) -> bool {
        matches!(self, ClientError::Auth(_))
    }

    pub(crate) fn network(url: &str, err: impl std::fmt::Display) -> Self {
        ClientError::Network {
            url: url.to_string(),
            status: None,
            message: err.to_string(),
        }
    }
}
