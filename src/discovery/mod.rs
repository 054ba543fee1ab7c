//! Source discovery: ask the completion API where a player's cards are
//! listed or documented, and collect the URLs it points at.

pub mod error;


pub use error::DiscoveryError;

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::{debug, info};

use crate::client::{CompletionClient, Prompt};

const SYSTEM_PROMPT: &str = "You are a research assistant. Return reputable URLs that directly reference \
specific soccer trading cards (set, year, variant, grade/serial where possible). \
Prefer official marketplaces (eBay item pages, PWCC, Goldin), manufacturer pages, \
and credible hobby references. Include recent/active listings where possible.";

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)https?://[^\s)>\]"}]+"#).expect("url pattern is valid")
});

/// Trailing characters that belong to prose, not to the URL.
const URL_TRAILING_PUNCTUATION: &[char] = &['.', ',', ')', ';', ':'];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Result of one discovery call.
pub struct DiscoveredSources {
    /// User prompt that was sent.
    pub prompt: String,
    /// Raw answer text.
    pub answer: String,
    /// Citations attached by the API.
    pub citations: Vec<String>,
    /// Citations followed by URLs found in the answer, deduplicated and truncated.
    pub urls: Vec<String>,
}

/// Extracts http(s) URLs from free text, trimming trailing punctuation and
/// dropping repeats (first occurrence wins).
pub fn extract_urls(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    URL_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().trim_end_matches(URL_TRAILING_PUNCTUATION).to_string())
        .filter(|u| seen.insert(u.clone()))
        .collect()
}

/// Merges `citations` and `extracted` in that order, removing duplicates,
/// and keeps at most `max_urls`.
pub fn merge_urls(citations: &[String], extracted: &[String], max_urls: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    citations
        .iter()
        .chain(extracted.iter())
        .filter(|u| seen.insert(u.as_str()))
        .take(max_urls)
        .cloned()
        .collect()
}

/// Builds the discovery prompt for `player`.
pub fn build_prompt(player: &str) -> Prompt {
    let user = format!(
        "Player: {}\n\
         Task: Find specific active or recent listings and authoritative references for this player's cards. \
         Return direct item or reference URLs (not just homepages). Include a mix of marketplaces and credible sources.",
        player
    );
    Prompt::new(SYSTEM_PROMPT, user)
}

/// Finds candidate source URLs for a player via a [`CompletionClient`].
pub struct SourceDiscovery<C> {
    client: C,
}

impl<C: CompletionClient> SourceDiscovery<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub async fn discover(
        &self,
        player: &str,
        max_urls: usize,
    ) -> Result<DiscoveredSources, DiscoveryError> {
        let player = player.trim();
        if player.is_empty() {
            return Err(DiscoveryError::InvalidInput {
                reason: "player name cannot be empty".to_string(),
            });
        }

        let prompt = build_prompt(player);
        debug!(player = player, max_urls = max_urls, "Discovering sources");

        let completion = self.client.complete(&prompt).await?;
        let extracted = extract_urls(&completion.answer);
        let urls = merge_urls(&completion.citations, &extracted, max_urls);

        info!(
            player = player,
            citations = completion.citations.len(),
            extracted = extracted.len(),
            kept = urls.len(),
            "Sources discovered"
        );

        Ok(DiscoveredSources {
            prompt: prompt.user,
            answer: completion.answer,
            citations: completion.citations,
            urls,
        })
    }
}
