//! Interpretable credibility scoring for soccer-card source URLs.
//!
//! A URL is scored from weighted [`Signal`]s:
//!
//! - **Priors**: host reputation (marketplace, auction house, manufacturer,
//!   grading company) and transport security.
//! - **Content**: body length, outbound link density, author hints.
//! - **Listing**: for eBay pages, seller feedback, return policy, hobby
//!   keywords, image count and a small sentiment lexicon.
//!
//! The weighted sum is squashed onto `0..=100` with a logistic curve centred
//! at 0.8, so a score can always be explained by listing its signals.
//!
//! Pages come from a [`PageFetcher`]: live HTTP, or synthetic fixtures for
//! dry runs. Fetch failures do not abort scoring; the report carries
//! `status = fetch_error` and the priors alone.

pub mod error;
pub mod fetch;
pub mod hosts;
pub mod scorer;
pub mod signals;
pub mod text;
pub mod types;


pub use error::FetchError;
pub use fetch::{
    HttpPageFetcher, PageFetcher, PageSource, SyntheticPageFetcher, synthetic_page_for,
};
pub use hosts::HostKind;
pub use scorer::{CredibilityScorer, parse_source_url, percentile, squash_0_100};
pub use types::{CredibilityReport, CredibilityScore, ReportMeta, ReportStatus, Signal};
