//! Signal extractors. Each returns normalized values with fixed weights so a
//! score can always be explained by listing its signals.

use regex::Regex;
use std::sync::LazyLock;

use super::hosts::HostKind;
use super::text::{count_images, visible_text};
use super::types::Signal;

macro_rules! pattern {
    ($name:ident, $re:expr) => {
        static $name: LazyLock<Regex> =
            LazyLock::new(|| Regex::new($re).expect(concat!(stringify!($name), " is valid")));
    };
}

pattern!(LINK, r"(doi\.org/|https?://)\S+");
pattern!(AUTHOR_HINT, r"\bby\s+[A-Z][a-z]+");
pattern!(WORD, r"[a-zA-Z\-]+");
pattern!(FEEDBACK_PCT, r"(?i)(\d{1,3}\.\d)%\s*positive feedback");
pattern!(FEEDBACK_COUNT, r"(?i)\((\d{2,6})\)\s*feedback");
pattern!(TOP_RATED, r"(?i)top rated seller");
pattern!(RETURNS_WINDOW, r"(?i)\b(30|60)\s*day returns?\b");
pattern!(NO_RETURNS, r"(?i)no returns");
pattern!(NUMBER_HINT, r"\b#?\d{1,2}\b");
pattern!(YEAR, r"\b(19|20)\d{2}\b");
pattern!(SET_NAME, r"(prizm|topps|merlin|select|optic|megacracks|chrome)");
pattern!(SHIPS_FROM, r"ships from\s+[A-Za-z ]+");

/// Hobby keywords and how much each says about listing specificity.
const CARD_TERMS: &[(&str, f64)] = &[
    ("rookie", 0.12),
    ("rc", 0.08),
    ("psa 10", 0.16),
    ("bgs 9.5", 0.10),
    ("sgc 10", 0.08),
    ("gem mint", 0.12),
    ("auto", 0.12),
    ("autograph", 0.12),
    // catches serial numbering such as /10 or /99
    ("/", 0.10),
    ("refractor", 0.08),
    ("sapphire", 0.08),
    ("logofractor", 0.08),
    ("color match", 0.10),
    ("prizm", 0.08),
    ("topps", 0.06),
    ("merlin", 0.06),
    ("select", 0.06),
    ("optic", 0.06),
    ("chrome", 0.06),
];

const POSITIVE_WORDS: &[&str] = &[
    "grail",
    "pc",
    "beautiful",
    "clean",
    "crisp",
    "gem",
    "iconic",
    "undervalued",
    "deal",
    "bargain",
    "legend",
    "heat",
];

const NEGATIVE_WORDS: &[&str] = &[
    "creased",
    "damage",
    "ding",
    "scratches",
    "off-center",
    "offcenter",
    "trimmed",
    "fake",
    "reprint",
    "altered",
    "stain",
    "worst",
    "overpriced",
];

/// Prior trust in the host itself.
pub fn domain_prior(host: &str) -> Signal {
    let host = host.to_ascii_lowercase();
    let kind = HostKind::classify(&host);

    let (value, weight, rationale) = match kind {
        HostKind::Ebay => (0.75, 0.10, "Marketplace prior (eBay)"),
        HostKind::Comc => (0.72, 0.10, "Marketplace prior (COMC)"),
        k if k.is_auction() => (0.78, 0.10, "Auction platform prior (PWCC/Goldin)"),
        k if k.is_manufacturer() => (0.76, 0.08, "Manufacturer prior (Topps/Panini)"),
        k if k.is_grader() => (0.80, 0.08, "Grading company prior (PSA/SGC/BGS)"),
        _ if host.ends_with(".com") => (0.60, 0.06, ".com baseline"),
        _ => (0.50, 0.05, "Unknown/low-signal domain"),
    };

    Signal::new("domain_prior", value, weight, rationale)
}

pub fn transport_security(scheme: &str) -> Signal {
    let value = if scheme.eq_ignore_ascii_case("https") {
        1.0
    } else {
        0.4
    };
    Signal::new("https", value, 0.04, "HTTPS vs HTTP transport")
}

/// Body length, outbound link density and author hints.
pub fn content_quality(html: &str) -> Vec<Signal> {
    let text = visible_text(html);
    let words = text.split_whitespace().count();

    let (value, rationale) = match words {
        0..=30 => (0.25, "Very short body"),
        31..=120 => (0.6, "Short body"),
        121..=2500 => (0.82, "Reasonable body length"),
        _ => (0.65, "Very long body"),
    };

    let links = LINK.find_iter(&text).count();
    let has_author = AUTHOR_HINT.is_match(&text);

    vec![
        Signal::new("content_length", value, 0.07, rationale),
        Signal::new(
            "citations_links",
            (links as f64 / 5.0).min(1.0),
            0.04,
            "Outbound refs/links density",
        ),
        Signal::new(
            "author_block_hint",
            if has_author { 1.0 } else { 0.55 },
            0.03,
            "Author/date hints",
        ),
    ]
}

/// Lexicon polarity mapped onto `[0, 1]` (0.5 is neutral).
pub fn sentiment(text: &str) -> Signal {
    let lower = text.to_lowercase();
    let (pos, neg) = WORD
        .find_iter(&lower)
        .map(|m| m.as_str())
        .fold((0usize, 0usize), |(pos, neg), word| {
            (
                pos + POSITIVE_WORDS.contains(&word) as usize,
                neg + NEGATIVE_WORDS.contains(&word) as usize,
            )
        });

    let total = (pos + neg).max(1) as f64;
    let polarity = (pos as f64 - neg as f64) / total;

    Signal::new(
        "sentiment",
        (polarity + 1.0) / 2.0,
        0.05,
        format!("lexicon polarity {:.2}", polarity),
    )
}

/// Seller, policy and card-specificity signals for an eBay listing page.
pub fn ebay_listing(html: &str) -> Vec<Signal> {
    let text = visible_text(html);
    let lower = text.to_lowercase();
    let mut signals = vec![sentiment(&text)];

    match FEEDBACK_PCT
        .captures(&text)
        .and_then(|c| c[1].parse::<f64>().ok())
    {
        Some(pct) => signals.push(Signal::new(
            "seller_feedback_pct",
            (0.2 + 0.8 * (pct / 100.0)).min(1.0),
            0.12,
            format!("Seller feedback {}%", pct),
        )),
        None => signals.push(Signal::new(
            "seller_feedback_pct",
            0.55,
            0.06,
            "Feedback % not found",
        )),
    }

    if let Some(count) = FEEDBACK_COUNT
        .captures(&text)
        .and_then(|c| c[1].parse::<u64>().ok())
    {
        let value = ((count.max(1) as f64).log10() / 5.0 + 0.4).min(1.0);
        signals.push(Signal::new(
            "seller_feedback_count",
            value,
            0.08,
            format!("Feedback count {}", count),
        ));
    }

    if TOP_RATED.is_match(&text) {
        signals.push(Signal::new("top_rated", 1.0, 0.06, "Top Rated Seller badge"));
    }

    if RETURNS_WINDOW.is_match(&text) {
        signals.push(Signal::new("returns_policy", 0.92, 0.05, "30/60-day returns"));
    } else if NO_RETURNS.is_match(&text) {
        signals.push(Signal::new("returns_policy", 0.50, 0.05, "No returns"));
    }

    signals.push(Signal::new(
        "card_specificity_terms",
        card_term_score(&lower),
        0.14,
        "Hobby keywords present",
    ));

    let year_and_set = YEAR.is_match(&text) && SET_NAME.is_match(&lower);
    signals.push(Signal::new(
        "year_set_hint",
        if year_and_set { 1.0 } else { 0.6 },
        0.06,
        "Year+Set mentioned",
    ));

    let images = count_images(html);
    let image_value = match images {
        n if n >= 8 => 0.95,
        n if n >= 4 => 0.75,
        _ => 0.55,
    };
    signals.push(Signal::new(
        "image_count",
        image_value,
        0.05,
        format!("{} images", images),
    ));

    if SHIPS_FROM.is_match(&lower) {
        signals.push(Signal::new("shipping_from", 0.70, 0.03, "Ships-from present"));
    }

    signals
}

/// Summed keyword weights (substring hits) plus a small bonus for card
/// numbers, capped at 1.0.
pub fn card_term_score(lower: &str) -> f64 {
    let mut score: f64 = CARD_TERMS
        .iter()
        .filter(|(term, _)| lower.contains(term))
        .map(|(_, weight)| weight)
        .sum();

    if NUMBER_HINT.is_match(lower) {
        score += 0.04;
    }

    score.min(1.0)
}
