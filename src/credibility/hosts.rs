//! Host classification for hobby marketplaces, manufacturers and graders.

use regex::Regex;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostKind {
    Ebay,
    Comc,
    Pwcc,
    Goldin,
    Topps,
    Panini,
    Psa,
    Sgc,
    Beckett,
    Other,
}

static HOST_PATTERNS: LazyLock<Vec<(HostKind, Regex)>> = LazyLock::new(|| {
    [
        (HostKind::Ebay, r"(^|\.)ebay\.(com|co\.[a-z]{2}|[a-z]{2})$"),
        (HostKind::Comc, r"(^|\.)comc\.com$"),
        (HostKind::Pwcc, r"(^|\.)pwccmarketplace\.com$"),
        (HostKind::Goldin, r"(^|\.)goldin\.co(m)?$"),
        (HostKind::Topps, r"(^|\.)topps\.com$"),
        (HostKind::Panini, r"(^|\.)paniniamerica\.net$"),
        (HostKind::Psa, r"(^|\.)psacard\.com$"),
        (HostKind::Sgc, r"(^|\.)gosgc\.com$"),
        (HostKind::Beckett, r"(^|\.)beckett\.com$"),
    ]
    .into_iter()
    .map(|(kind, pattern)| {
        let re = Regex::new(&format!("(?i){}", pattern)).expect("host pattern is valid");
        (kind, re)
    })
    .collect()
});

impl HostKind {
    /// Classifies a bare host name (no scheme, no port).
    pub fn classify(host: &str) -> Self {
        HOST_PATTERNS
            .iter()
            .find(|(_, re)| re.is_match(host))
            .map(|(kind, _)| *kind)
            .unwrap_or(HostKind::Other)
    }

    pub fn is_ebay(&self) -> bool {
        matches!(self, HostKind::Ebay)
    }

    pub fn is_auction(&self) -> bool {
        matches!(self, HostKind::Pwcc | HostKind::Goldin)
    }

    pub fn is_manufacturer(&self) -> bool {
        matches!(self, HostKind::Topps | HostKind::Panini)
    }

    pub fn is_grader(&self) -> bool {
        matches!(self, HostKind::Psa | HostKind::Sgc | HostKind::Beckett)
    }
}
