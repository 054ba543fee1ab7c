use reqwest::Url;
use reqwest::header::USER_AGENT;
use std::time::Duration;
use tracing::debug;

use crate::constants::FETCH_USER_AGENT;

use super::error::FetchError;
use super::hosts::HostKind;

/// Source of page HTML for a URL.
pub trait PageFetcher: Send + Sync {
    fn fetch(&self, url: &Url) -> impl std::future::Future<Output = Result<String, FetchError>> + Send;
}

#[derive(Clone, Debug)]
/// Fetches pages over HTTP with the scorer's User-Agent.
pub struct HttpPageFetcher {
    http: reqwest::Client,
}

impl HttpPageFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::ClientBuild {
                message: e.to_string(),
            })?;
        Ok(Self { http })
    }
}

impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        debug!(url = %url, "Fetching page");

        let response = self
            .http
            .get(url.clone())
            .header(USER_AGENT, FETCH_USER_AGENT)
            .send()
            .await
            .map_err(|e| FetchError::Request {
                message: e.to_string(),
            })?;

        let status = response.status();
        if status.as_u16() >= 400 {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| FetchError::Request {
            message: e.to_string(),
        })
    }
}

#[derive(Clone, Copy, Debug, Default)]
/// Serves canned pages keyed on the host, for dry runs.
pub struct SyntheticPageFetcher;

impl PageFetcher for SyntheticPageFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        Ok(synthetic_page_for(url.host_str().unwrap_or_default()).to_string())
    }
}

/// Fixture HTML for a host: an eBay listing, a COMC listing, or a short article.
pub fn synthetic_page_for(host: &str) -> &'static str {
    match HostKind::classify(host) {
        HostKind::Ebay => concat!(
            "<html><body>",
            "Top Rated Seller (99.7% positive feedback) (12450) feedback. ",
            "2024 Topps Chrome UEFA Refractor PSA 10 Rookie /99 auto. ",
            "Ships from New York. 30 day returns. ",
            "<img/><img/><img/><img/><img/><img/>",
            "</body></html>"
        ),
        HostKind::Comc => concat!(
            "<html><body>",
            "COMC Listing — Seller: COMC. Returns accepted. ",
            "2020 Panini Prizm EPL Silver RC. Multiple images. ",
            "<img/><img/><img/><img/>",
            "</body></html>"
        ),
        _ => concat!(
            "<html><body>By John Doe. Published 2023. ",
            "Sample article text with some length and a doi.org/10.x link.</body></html>"
        ),
    }
}

#[derive(Clone, Debug)]
/// Picks live fetching or synthetic pages per call.
pub enum PageSource {
    Http(HttpPageFetcher),
    Synthetic(SyntheticPageFetcher),
}

impl PageSource {
    pub fn is_synthetic(&self) -> bool {
        matches!(self, PageSource::Synthetic(_))
    }
}

impl PageFetcher for PageSource {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        match self {
            PageSource::Http(fetcher) => fetcher.fetch(url).await,
            PageSource::Synthetic(fetcher) => fetcher.fetch(url).await,
        }
    }
}
