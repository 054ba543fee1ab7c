use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, info, warn};

use crate::client::{CompletionClient, Prompt};

use super::error::ScoringError;
use super::types::{ParsedScore, ScoreRequest, ScoreResult};

const SYSTEM_PROMPT: &str = "You assess the credibility of soccer trading card descriptions. \
Judge whether the description is specific and consistent (player, set, year, parallel, \
grade, serial numbering) and whether the claims are plausible for the market. \
Reply with exactly one line in the form `Score: <n>/10 — <one sentence rationale>`.";

static SCORE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:credibility\s+)?score\s*\**\s*[:=]\s*\**\s*(\d+(?:\.\d+)?)\s*(?:/|out\s+of)\s*(\d+(?:\.\d+)?)(.*)$",
    )
    .expect("score line pattern is valid")
});

/// Characters stripped between the score and the rationale.
fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '—' | '–' | '-' | ':' | '|' | ',' | ';' | '*' | '.')
}

/// Parses `Score: <n>/<d> <sep> <rationale>` out of a model reply.
///
/// The first line carrying a score wins. When that line has no rationale,
/// the following non-empty lines are used instead.
pub fn parse_score_response(text: &str) -> Result<ParsedScore, ScoringError> {
    let lines: Vec<&str> = text.lines().collect();

    let (index, caps) = lines
        .iter()
        .enumerate()
        .find_map(|(i, line)| SCORE_LINE.captures(line).map(|c| (i, c)))
        .ok_or_else(|| ScoringError::parse("no 'Score: n/d' line found", text))?;

    let score: f32 = caps[1]
        .parse()
        .map_err(|_| ScoringError::parse("score is not a number", text))?;
    let scale: f32 = caps[2]
        .parse()
        .map_err(|_| ScoringError::parse("scale is not a number", text))?;

    if scale <= 0.0 {
        return Err(ScoringError::parse("scale must be greater than zero", text));
    }
    if score > scale {
        return Err(ScoringError::parse(
            format!("score {} exceeds scale {}", score, scale),
            text,
        ));
    }

    let mut rationale = caps
        .get(3)
        .map(|m| m.as_str().trim_start_matches(is_separator).trim().to_string())
        .unwrap_or_default();

    if rationale.is_empty() {
        rationale = lines[index + 1..]
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
    }

    if rationale.is_empty() {
        return Err(ScoringError::parse("rationale is empty", text));
    }

    Ok(ParsedScore {
        score,
        scale,
        rationale,
    })
}

/// Turns a [`ScoreRequest`] into a prompt, asks the model and parses the verdict.
pub struct Scorer<C> {
    client: C,
}

impl<C: CompletionClient> std::fmt::Debug for Scorer<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scorer")
            .field("model", &self.client.model())
            .finish()
    }
}

impl<C: CompletionClient> Scorer<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn build_prompt(request: &ScoreRequest) -> Result<Prompt, ScoringError> {
        let description = request.description.trim();
        if description.is_empty() {
            return Err(ScoringError::InvalidInput {
                reason: "card description cannot be empty".to_string(),
            });
        }

        let mut user = format!("Card: {}", description);
        for (label, value) in request.context_fields() {
            user.push('\n');
            user.push_str(label);
            user.push_str(": ");
            user.push_str(&value);
        }
        user.push_str("\nTask: Rate how credible this card description is.");

        Ok(Prompt::new(SYSTEM_PROMPT, user))
    }

    pub async fn score(&self, request: &ScoreRequest) -> Result<ScoreResult, ScoringError> {
        let prompt = Self::build_prompt(request)?;

        debug!(
            description_len = request.description.len(),
            model = self.client.model(),
            "Scoring card description"
        );

        let completion = self.client.complete(&prompt).await?;

        if !completion.has_content {
            warn!("Completion body had no message content");
            return Err(ScoringError::parse(
                "response had no message content",
                &completion.answer,
            ));
        }

        let parsed = parse_score_response(&completion.answer).inspect_err(|e| {
            warn!(error = %e, "Model reply did not contain a usable score");
        })?;

        info!(
            score = parsed.score,
            scale = parsed.scale,
            "Card description scored"
        );

        Ok(ScoreResult {
            score: parsed.score,
            scale: parsed.scale,
            rationale: parsed.rationale,
            model: self.client.model().to_string(),
        })
    }
}
