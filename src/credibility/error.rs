use thiserror::Error;

#[derive(Debug, Clone, Error)]
/// Errors returned while fetching a candidate page.
pub enum FetchError {
    /// The server answered with a 4xx/5xx status.
    #[error("HTTP {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// Transport failure or timeout.
    #[error("{message}")]
    Request {
        /// Error message.
        message: String,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {message}")]
    ClientBuild {
        /// Error message.
        message: String,
    },
}
