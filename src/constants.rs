//! Cross-cutting, shared constants.
//!
//! Scoring weights live next to the signals that use them; this module only
//! holds values that more than one module (or the server) needs to agree on.

/// Name of the environment variable carrying the Perplexity secret.
pub const API_KEY_ENV: &str = "PERPLEXITY_API_KEY";

pub const DEFAULT_API_BASE_URL: &str = "https://api.perplexity.ai";
pub const DEFAULT_MODEL: &str = "sonar-pro";

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 8;

/// Gateway port when `CARDCRED_PORT` is unset.
pub const DEFAULT_PORT: u16 = 8080;

pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_TOP_P: f32 = 0.9;

/// Default number of discovered URLs kept per search.
pub const DEFAULT_MAX_URLS: usize = 12;
/// Bounds applied to a user-supplied `max_urls`.
pub const MIN_MAX_URLS: usize = 5;
pub const MAX_MAX_URLS: usize = 25;

/// When the API returns no message content, the answer falls back to the raw
/// body truncated to this many characters.
pub const RAW_ANSWER_FALLBACK_CHARS: usize = 2000;

/// User-Agent sent when fetching candidate pages.
pub const FETCH_USER_AGENT: &str = "CredScorer/0.1";

/// Version tag stamped into every credibility report.
pub const SCORER_VERSION: &str = "d3-0.1";

/// Number of strongest signals summarized in a listing row.
pub const TOP_RATIONALES: usize = 3;

/// Clamps a requested URL count into `MIN_MAX_URLS..=MAX_MAX_URLS`.
pub fn clamp_max_urls(requested: usize) -> usize {
    requested.clamp(MIN_MAX_URLS, MAX_MAX_URLS)
}
