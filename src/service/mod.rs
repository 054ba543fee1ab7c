//! End-to-end pipelines behind the UI and the HTTP gateway.
//!
//! [`ScoringService`] wires one [`CompletionClient`] into the card
//! [`Scorer`] and [`SourceDiscovery`], and owns the live page fetcher used by
//! the URL credibility scorer.
//!
//! Two flows:
//!
//! - [`ScoringService::score_card`]: description in, [`ScoreResult`] out.
//! - [`ScoringService::search_and_score`]: player in, ranked
//!   [`ListingRow`]s plus a short user-facing note out. Every failure becomes
//!   a note; [`ScoringService::search`] is the fallible variant.

pub mod error;


pub use error::{EMPTY_PLAYER_NOTE, MISSING_KEY_NOTE, ServiceError};

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

use crate::client::{CompletionClient, PerplexityClient};
use crate::config::Config;
use crate::constants::{TOP_RATIONALES, clamp_max_urls};
use crate::credibility::{
    CredibilityReport, CredibilityScorer, HttpPageFetcher, PageSource, ReportStatus,
    SyntheticPageFetcher,
};
use crate::discovery::SourceDiscovery;
use crate::scoring::{ScoreRequest, ScoreResult, Scorer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One row of the ranked sources table.
pub struct ListingRow {
    pub score: f64,
    pub percentile: Option<f64>,
    pub host: Option<String>,
    pub status: ReportStatus,
    pub url: String,
    /// Strongest signals as `"name: rationale; ..."`.
    pub top_rationales: String,
}

impl From<&CredibilityReport> for ListingRow {
    fn from(report: &CredibilityReport) -> Self {
        Self {
            score: report.score.absolute,
            percentile: report.score.percentile,
            host: report.meta.host.clone(),
            status: report.status,
            url: report.url.clone(),
            top_rationales: report.top_rationales(TOP_RATIONALES),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Result of one search-and-score submission.
pub struct SearchOutcome {
    /// Correlates log lines for this submission.
    pub run_id: Uuid,
    pub player: String,
    /// Ranked by score, highest first. Empty when the note reports a problem.
    pub rows: Vec<ListingRow>,
    pub note: String,
    pub dry_run: bool,
}

impl SearchOutcome {
    fn note_only(run_id: Uuid, player: &str, dry_run: bool, note: String) -> Self {
        Self {
            run_id,
            player: player.to_string(),
            rows: Vec::new(),
            note,
            dry_run,
        }
    }
}

/// Card scoring and source search over a shared completion client.
pub struct ScoringService<C> {
    client: Arc<C>,
    scorer: Scorer<Arc<C>>,
    discovery: SourceDiscovery<Arc<C>>,
    live_pages: HttpPageFetcher,
}

impl<C: CompletionClient> std::fmt::Debug for ScoringService<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoringService")
            .field("model", &self.client.model())
            .field("has_api_key", &self.client.has_api_key())
            .finish()
    }
}

impl ScoringService<PerplexityClient> {
    /// Builds the production service from validated configuration.
    pub fn from_config(config: &Config) -> Result<Self, ServiceError> {
        config.validate()?;
        let client = PerplexityClient::new(config.client_config())?;
        Self::new(client, config.fetch_timeout)
    }
}

impl<C: CompletionClient> ScoringService<C> {
    pub fn new(client: C, fetch_timeout: Duration) -> Result<Self, ServiceError> {
        let client = Arc::new(client);
        Ok(Self {
            scorer: Scorer::new(Arc::clone(&client)),
            discovery: SourceDiscovery::new(Arc::clone(&client)),
            live_pages: HttpPageFetcher::new(fetch_timeout)?,
            client,
        })
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn has_api_key(&self) -> bool {
        self.client.has_api_key()
    }

    /// Scores a card description.
    pub async fn score_card(&self, request: &ScoreRequest) -> Result<ScoreResult, ServiceError> {
        Ok(self.scorer.score(request).await?)
    }

    /// Scores a single URL, live or against synthetic pages.
    pub async fn score_url(&self, url: &str, dry_run: bool) -> CredibilityReport {
        self.credibility(dry_run).score_url(url, None).await
    }

    /// Discovers sources for `player` and ranks them. Never fails: problems
    /// are reported in [`SearchOutcome::note`].
    pub async fn search_and_score(&self, player: &str, max_urls: usize, dry_run: bool) -> SearchOutcome {
        let run_id = Uuid::new_v4();
        match self.run_search(run_id, player, max_urls, dry_run).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(run_id = %run_id, error = %e, "Search failed");
                SearchOutcome::note_only(run_id, player.trim(), dry_run, e.user_message())
            }
        }
    }

    /// Like [`search_and_score`](Self::search_and_score), but returns the
    /// failure instead of folding it into a note.
    pub async fn search(
        &self,
        player: &str,
        max_urls: usize,
        dry_run: bool,
    ) -> Result<SearchOutcome, ServiceError> {
        self.run_search(Uuid::new_v4(), player, max_urls, dry_run)
            .await
    }

    async fn run_search(
        &self,
        run_id: Uuid,
        player: &str,
        max_urls: usize,
        dry_run: bool,
    ) -> Result<SearchOutcome, ServiceError> {
        let player = player.trim();
        if player.is_empty() {
            return Err(ServiceError::EmptyPlayer);
        }
        if !self.client.has_api_key() {
            return Err(ServiceError::MissingKey);
        }

        let max_urls = clamp_max_urls(max_urls);
        info!(
            run_id = %run_id,
            player = player,
            max_urls = max_urls,
            dry_run = dry_run,
            "Search started"
        );

        let sources = self.discovery.discover(player, max_urls).await?;
        if sources.urls.is_empty() {
            info!(run_id = %run_id, player = player, "No URLs discovered");
            return Ok(SearchOutcome::note_only(
                run_id,
                player,
                dry_run,
                format!("No URLs found for '{}'. Try a different spelling.", player),
            ));
        }

        let reports = self.credibility(dry_run).rank_listings(&sources.urls).await;
        let rows: Vec<ListingRow> = reports.iter().map(ListingRow::from).collect();

        info!(
            run_id = %run_id,
            urls = sources.urls.len(),
            top_score = rows.first().map(|r| r.score),
            "Search finished"
        );

        Ok(SearchOutcome {
            run_id,
            player: player.to_string(),
            note: format!("Found {} URLs for {}.", sources.urls.len(), player),
            rows,
            dry_run,
        })
    }

    fn credibility(&self, dry_run: bool) -> CredibilityScorer<PageSource> {
        let source = if dry_run {
            PageSource::Synthetic(SyntheticPageFetcher)
        } else {
            PageSource::Http(self.live_pages.clone())
        };
        CredibilityScorer::new(source)
    }
}
