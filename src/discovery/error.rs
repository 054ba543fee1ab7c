use thiserror::Error;

use crate::client::ClientError;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("completion request failed: {0}")]
    Client(#[from] ClientError),

    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },
}

impl DiscoveryError {
    /// Returns `true` when the underlying failure is a credential problem.
    pub fn is_auth(&self) -> bool {
        matches!(self, DiscoveryError::Client(e) if e.is_auth())
    }
}
