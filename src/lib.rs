//! Cardcred library crate (used by the server and integration tests).
//!
//! # Public API Surface
//!
//! ## Card scoring
//! - [`Scorer`], [`ScoreRequest`], [`ScoreResult`] - Description credibility via the completion API
//! - [`parse_score_response`] - Reply parser (`Score: n/d - rationale`)
//!
//! ## Source discovery and URL credibility
//! - [`SourceDiscovery`], [`DiscoveredSources`] - Candidate URLs for a player
//! - [`CredibilityScorer`], [`CredibilityReport`], [`Signal`] - Interpretable URL scoring
//! - [`PageFetcher`], [`HttpPageFetcher`], [`SyntheticPageFetcher`] - Page sources
//!
//! ## Pipelines
//! - [`ScoringService`], [`SearchOutcome`], [`ListingRow`] - What the gateway calls
//!
//! ## Plumbing
//! - [`Config`], [`ConfigError`] - Environment configuration
//! - [`CompletionClient`], [`PerplexityClient`] - Completion API access
//!
//! ## Test/Mock Support
//! [`MockCompletionClient`] is available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod client;
pub mod config;
pub mod constants;
pub mod credibility;
pub mod discovery;
pub mod scoring;
pub mod service;

#[cfg(any(test, feature = "mock"))]
pub use client::MockCompletionClient;
pub use client::{
    AuthError, ClientConfig, ClientError, Completion, CompletionClient, PerplexityClient, Prompt,
};

pub use config::{Config, ConfigError};
pub use constants::clamp_max_urls;

pub use credibility::{
    CredibilityReport, CredibilityScore, CredibilityScorer, FetchError, HostKind, HttpPageFetcher,
    PageFetcher, PageSource, ReportMeta, ReportStatus, Signal, SyntheticPageFetcher,
};
pub use discovery::{DiscoveredSources, DiscoveryError, SourceDiscovery};
pub use scoring::{ParsedScore, ScoreRequest, ScoreResult, Scorer, ScoringError, parse_score_response};
pub use service::{ListingRow, ScoringService, SearchOutcome, ServiceError};
