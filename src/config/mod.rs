//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `CARDCRED_*` environment
//! variables; the secret itself is read from `PERPLEXITY_API_KEY`.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::time::Duration;

use crate::client::ClientConfig;
use crate::constants::{
    API_KEY_ENV, DEFAULT_API_BASE_URL, DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_MAX_URLS,
    DEFAULT_MODEL, DEFAULT_PORT, DEFAULT_REQUEST_TIMEOUT_SECS, clamp_max_urls,
};

/// Service configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read overrides on top of defaults.
#[derive(Clone)]
pub struct Config {
    /// Perplexity API key. `None` when `PERPLEXITY_API_KEY` is unset or blank.
    pub api_key: Option<String>,

    /// Base URL of the completion API. Default: `https://api.perplexity.ai`.
    pub api_base_url: String,

    /// Model name sent with each completion. Default: `sonar-pro`.
    pub model: String,

    /// Timeout for one completion request. Default: 30 s.
    pub request_timeout: Duration,

    /// Timeout for fetching one candidate page. Default: 8 s.
    pub fetch_timeout: Duration,

    /// URLs kept per search (clamped to 5..=25). Default: `12`.
    pub max_urls: usize,

    /// Score synthetic pages instead of fetching. Default: `false`.
    pub dry_run: bool,

    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,
}

// Hand-written so the secret never ends up in logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_base_url", &self.api_base_url)
            .field("model", &self.model)
            .field("request_timeout", &self.request_timeout)
            .field("fetch_timeout", &self.fetch_timeout)
            .field("max_urls", &self.max_urls)
            .field("dry_run", &self.dry_run)
            .field("port", &self.port)
            .field("bind_addr", &self.bind_addr)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            max_urls: DEFAULT_MAX_URLS,
            dry_run: false,
            port: DEFAULT_PORT,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
        }
    }
}

impl Config {
    pub const ENV_API_BASE_URL: &'static str = "CARDCRED_API_BASE_URL";
    pub const ENV_MODEL: &'static str = "CARDCRED_MODEL";
    pub const ENV_REQUEST_TIMEOUT_SECS: &'static str = "CARDCRED_REQUEST_TIMEOUT_SECS";
    pub const ENV_FETCH_TIMEOUT_SECS: &'static str = "CARDCRED_FETCH_TIMEOUT_SECS";
    pub const ENV_MAX_URLS: &'static str = "CARDCRED_MAX_URLS";
    pub const ENV_DRY_RUN: &'static str = "CARDCRED_DRY_RUN";
    pub const ENV_PORT: &'static str = "CARDCRED_PORT";
    pub const ENV_BIND_ADDR: &'static str = "CARDCRED_BIND_ADDR";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let api_key = Self::parse_optional_string_from_env(API_KEY_ENV);
        let api_base_url =
            Self::parse_string_from_env(Self::ENV_API_BASE_URL, defaults.api_base_url);
        let model = Self::parse_string_from_env(Self::ENV_MODEL, defaults.model);
        let request_timeout = Self::parse_secs_from_env(
            Self::ENV_REQUEST_TIMEOUT_SECS,
            defaults.request_timeout,
        )?;
        let fetch_timeout =
            Self::parse_secs_from_env(Self::ENV_FETCH_TIMEOUT_SECS, defaults.fetch_timeout)?;
        let max_urls = Self::parse_usize_from_env(Self::ENV_MAX_URLS, defaults.max_urls)?;
        let dry_run = Self::parse_bool_from_env(Self::ENV_DRY_RUN, defaults.dry_run)?;
        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;

        Ok(Self {
            api_key,
            api_base_url,
            model,
            request_timeout,
            fetch_timeout,
            max_urls: clamp_max_urls(max_urls),
            dry_run,
            port,
            bind_addr,
        })
    }

    /// Validates basic invariants. A missing API key is not an error here.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match reqwest::Url::parse(&self.api_base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {}
            Ok(url) => {
                return Err(ConfigError::InvalidBaseUrl {
                    value: self.api_base_url.clone(),
                    reason: format!("unsupported scheme '{}' or missing host", url.scheme()),
                });
            }
            Err(e) => {
                return Err(ConfigError::InvalidBaseUrl {
                    value: self.api_base_url.clone(),
                    reason: e.to_string(),
                });
            }
        }

        if self.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel);
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout {
                name: Self::ENV_REQUEST_TIMEOUT_SECS,
            });
        }
        if self.fetch_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout {
                name: Self::ENV_FETCH_TIMEOUT_SECS,
            });
        }

        Ok(())
    }

    /// Returns `true` if a non-blank API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Returns the API key or [`ConfigError::MissingEnvVar`].
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .ok_or(ConfigError::MissingEnvVar { name: API_KEY_ENV })
    }

    /// Builds the completion client settings, passing the key explicitly.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_key: self.api_key.clone(),
            base_url: self.api_base_url.clone(),
            model: self.model.clone(),
            timeout: self.request_timeout,
        }
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        match self.bind_addr {
            IpAddr::V4(addr) => format!("{}:{}", addr, self.port),
            IpAddr::V6(addr) => format!("[{}]:{}", addr, self.port),
        }
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        Self::parse_optional_string_from_env(var_name).unwrap_or(default)
    }

    fn parse_usize_from_env(var_name: &'static str, default: usize) -> Result<usize, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e| ConfigError::InvalidNumber {
                    name: var_name,
                    value,
                    source: e,
                }),
            Err(_) => Ok(default),
        }
    }

    fn parse_secs_from_env(
        var_name: &'static str,
        default: Duration,
    ) -> Result<Duration, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|e| ConfigError::InvalidNumber {
                    name: var_name,
                    value,
                    source: e,
                }),
            Err(_) => Ok(default),
        }
    }

    fn parse_bool_from_env(var_name: &'static str, default: bool) -> Result<bool, ConfigError> {
        match env::var(var_name) {
            Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" | "" => Ok(false),
                _ => Err(ConfigError::InvalidBool {
                    name: var_name,
                    value,
                }),
            },
            Err(_) => Ok(default),
        }
    }
}
