//! Configuration error types.

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Port value is outside valid range (1-65535).
    #[error("invalid port '{value}': must be between 1 and 65535")]
    InvalidPort { value: String },

    /// Port string could not be parsed as a number.
    #[error("failed to parse port '{value}': {source}")]
    PortParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Bind address string could not be parsed.
    #[error("failed to parse bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// A numeric setting could not be parsed.
    #[error("failed to parse {name}='{value}': {source}")]
    InvalidNumber {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// A boolean setting was not one of the accepted spellings.
    #[error("invalid boolean for {name}: '{value}'")]
    InvalidBool { name: &'static str, value: String },

    /// A timeout of zero seconds was configured.
    #[error("{name} must be greater than zero")]
    ZeroTimeout { name: &'static str },

    /// The API base URL is not an absolute http(s) URL.
    #[error("invalid API base URL '{value}': {reason}")]
    InvalidBaseUrl { value: String, reason: String },

    /// The model name is empty.
    #[error("model name cannot be empty")]
    EmptyModel,

    /// A required environment variable was not set.
    ///
    /// Loading never fails on a missing key; callers that need the secret up
    /// front use [`Config::require_api_key`](super::Config::require_api_key).
    #[error("missing required environment variable: {name}")]
    MissingEnvVar { name: &'static str },
}
