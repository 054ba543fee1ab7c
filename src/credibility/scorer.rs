use reqwest::Url;
use std::cmp::Ordering;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::constants::SCORER_VERSION;

use super::fetch::PageFetcher;
use super::hosts::HostKind;
use super::signals as extract;
use super::types::{CredibilityReport, CredibilityScore, ReportMeta, ReportStatus, Signal};

/// Raw weighted sum at which the squashed score is 50.
const SQUASH_MIDPOINT: f64 = 0.8;
/// Logistic steepness.
const SQUASH_STEEPNESS: f64 = 3.5;

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Logistic squash of a raw weighted sum onto `0..=100` (two decimals).
pub fn squash_0_100(raw: f64) -> f64 {
    let x = raw - SQUASH_MIDPOINT;
    let sig = 1.0 / (1.0 + (-SQUASH_STEEPNESS * x).exp());
    round2(100.0 * sig)
}

/// Share of `cohort` that is `<= x`, as a percentage (two decimals).
/// `None` for an empty cohort.
pub fn percentile(x: f64, cohort: &[f64]) -> Option<f64> {
    if cohort.is_empty() {
        return None;
    }
    let rank = cohort.iter().filter(|&&a| a <= x).count();
    Some(round2(100.0 * rank as f64 / cohort.len() as f64))
}

/// Validates `raw` as an absolute http(s) URL with a host.
pub fn parse_source_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw.trim()).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none_or(str::is_empty) {
        return Err("URL must include http(s) scheme and host".to_string());
    }
    Ok(url)
}

/// Interpretable URL credibility scorer.
#[derive(Debug, Clone)]
pub struct CredibilityScorer<F> {
    fetcher: F,
}

impl<F: PageFetcher> CredibilityScorer<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Scores one URL. Never fails: problems are reported through
    /// `status` and `errors`.
    pub async fn score_url(&self, url: &str, cohort: Option<&[f64]>) -> CredibilityReport {
        let start = Instant::now();

        let parsed = match parse_source_url(url) {
            Ok(parsed) => parsed,
            Err(reason) => {
                debug!(url = url, reason = %reason, "Rejecting invalid URL");
                return CredibilityReport {
                    url: url.to_string(),
                    status: ReportStatus::InvalidUrl,
                    score: CredibilityScore {
                        absolute: 0.0,
                        percentile: None,
                    },
                    signals: Vec::new(),
                    errors: vec![format!("invalid_url: {}", reason)],
                    meta: ReportMeta {
                        host: None,
                        is_ebay: false,
                        fetched_at: now_rfc3339(),
                        elapsed_ms: elapsed_ms(start),
                        fetch_ms: None,
                        version: SCORER_VERSION.to_string(),
                    },
                };
            }
        };

        let host = parsed.host_str().unwrap_or_default().to_ascii_lowercase();
        let is_ebay = HostKind::classify(&host).is_ebay();

        let mut signals: Vec<Signal> = vec![
            extract::domain_prior(&host),
            extract::transport_security(parsed.scheme()),
        ];
        let mut errors = Vec::new();
        let mut status = ReportStatus::Ok;
        let mut fetch_ms = None;

        match self.fetcher.fetch(&parsed).await {
            Ok(html) => {
                fetch_ms = Some(elapsed_ms(start));
                if !html.is_empty() {
                    signals.extend(extract::content_quality(&html));
                    if is_ebay {
                        signals.extend(extract::ebay_listing(&html));
                    }
                }
            }
            Err(e) => {
                warn!(url = url, error = %e, "Page fetch failed, scoring priors only");
                errors.push(format!("fetch_error: {}", e));
                status = ReportStatus::FetchError;
            }
        }

        let raw: f64 = signals.iter().map(Signal::contribution).sum();
        let absolute = squash_0_100(raw);
        let cohort_pct = cohort.and_then(|c| percentile(absolute, c));

        debug!(
            url = url,
            host = %host,
            raw = raw,
            absolute = absolute,
            signals = signals.len(),
            "URL scored"
        );

        CredibilityReport {
            url: url.to_string(),
            status,
            score: CredibilityScore {
                absolute,
                percentile: cohort_pct,
            },
            signals,
            errors,
            meta: ReportMeta {
                host: Some(host),
                is_ebay,
                fetched_at: now_rfc3339(),
                elapsed_ms: elapsed_ms(start),
                fetch_ms,
                version: SCORER_VERSION.to_string(),
            },
        }
    }

    /// Scores `urls` one after another, assigns percentiles within the batch
    /// and sorts by absolute score (highest first, ties keep input order).
    pub async fn rank_listings(&self, urls: &[String]) -> Vec<CredibilityReport> {
        let mut reports = Vec::with_capacity(urls.len());
        for url in urls {
            reports.push(self.score_url(url, None).await);
        }

        let cohort: Vec<f64> = reports.iter().map(|r| r.score.absolute).collect();
        for report in &mut reports {
            report.score.percentile = percentile(report.score.absolute, &cohort);
        }

        reports.sort_by(|a, b| {
            b.score
                .absolute
                .partial_cmp(&a.score.absolute)
                .unwrap_or(Ordering::Equal)
        });

        info!(
            count = reports.len(),
            top_score = reports.first().map(|r| r.score.absolute),
            "Listings ranked"
        );

        reports
    }
}
