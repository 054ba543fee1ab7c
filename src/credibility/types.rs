use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One interpretable input to a credibility score.
pub struct Signal {
    /// Stable signal identifier (e.g. `domain_prior`).
    pub name: String,
    /// Normalized value in `[0, 1]`, higher is better.
    pub value: f64,
    /// Relative influence in `[0, 1]`.
    pub weight: f64,
    /// Human-readable explanation.
    pub rationale: String,
}

impl Signal {
    pub fn new(name: &str, value: f64, weight: f64, rationale: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            value,
            weight,
            rationale: rationale.into(),
        }
    }

    /// `value * weight`.
    pub fn contribution(&self) -> f64 {
        self.value * self.weight
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Outcome of scoring one URL.
pub enum ReportStatus {
    Ok,
    InvalidUrl,
    FetchError,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Ok => "ok",
            ReportStatus::InvalidUrl => "invalid_url",
            ReportStatus::FetchError => "fetch_error",
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CredibilityScore {
    /// Squashed score in `0..=100`, rounded to two decimals.
    pub absolute: f64,
    /// Rank within a cohort in `0..=100`, if a cohort was given.
    pub percentile: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    pub is_ebay: bool,
    /// RFC 3339 UTC timestamp.
    pub fetched_at: String,
    pub elapsed_ms: u64,
    pub fetch_ms: Option<u64>,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Full scoring output for one URL.
pub struct CredibilityReport {
    pub url: String,
    pub status: ReportStatus,
    pub score: CredibilityScore,
    pub signals: Vec<Signal>,
    pub errors: Vec<String>,
    pub meta: ReportMeta,
}

impl CredibilityReport {
    /// The `n` signals with the largest contribution, strongest first.
    pub fn top_signals(&self, n: usize) -> Vec<&Signal> {
        let mut signals: Vec<&Signal> = self.signals.iter().collect();
        signals.sort_by(|a, b| {
            b.contribution()
                .partial_cmp(&a.contribution())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        signals.truncate(n);
        signals
    }

    /// `"name: rationale; ..."` for the strongest `n` signals.
    pub fn top_rationales(&self, n: usize) -> String {
        self.top_signals(n)
            .iter()
            .map(|s| format!("{}: {}", s.name, s.rationale))
            .collect::<Vec<_>>()
            .join("; ")
    }
}
