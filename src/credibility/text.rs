//! Cheap HTML-to-text helpers. Good enough for word counts and keyword hits;
//! not a conforming HTML parser.

use regex::Regex;
use std::sync::LazyLock;

static NON_CONTENT_BLOCKS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b.*?</script\s*>|<style\b.*?</style\s*>|<noscript\b.*?</noscript\s*>")
        .expect("block pattern is valid")
});

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("tag pattern is valid"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

static IMG_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<img\b").expect("img pattern is valid"));

/// Visible text of `html`: scripts/styles dropped, tags replaced by spaces,
/// common entities decoded, whitespace collapsed.
pub fn visible_text(html: &str) -> String {
    let without_blocks = NON_CONTENT_BLOCKS.replace_all(html, " ");
    let without_tags = TAG.replace_all(&without_blocks, " ");
    let decoded = decode_entities(&without_tags);
    WHITESPACE.replace_all(&decoded, " ").trim().to_string()
}

/// Number of `<img>` tags in `html`.
pub fn count_images(html: &str) -> usize {
    IMG_TAG.find_iter(html).count()
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
