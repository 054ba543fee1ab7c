use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// One card submission. Only `description` is required.
pub struct ScoreRequest {
    /// Free-text card description (e.g. "2020 Prizm Saka RC PSA 10").
    pub description: String,
    /// Player name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player: Option<String>,
    /// Product set (e.g. "Topps Chrome UEFA").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_name: Option<String>,
    /// Release year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    /// Grade label (e.g. "PSA 10").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    /// Where the description was found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

impl ScoreRequest {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn with_player(mut self, player: impl Into<String>) -> Self {
        self.player = Some(player.into());
        self
    }

    pub fn with_set_name(mut self, set_name: impl Into<String>) -> Self {
        self.set_name = Some(set_name.into());
        self
    }

    pub fn with_year(mut self, year: u16) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_grade(mut self, grade: impl Into<String>) -> Self {
        self.grade = Some(grade.into());
        self
    }

    pub fn with_source_url(mut self, source_url: impl Into<String>) -> Self {
        self.source_url = Some(source_url.into());
        self
    }

    /// `(label, value)` pairs for the optional context that is set.
    pub fn context_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        if let Some(player) = non_blank(&self.player) {
            fields.push(("Player", player.to_string()));
        }
        if let Some(set_name) = non_blank(&self.set_name) {
            fields.push(("Set", set_name.to_string()));
        }
        if let Some(year) = self.year {
            fields.push(("Year", year.to_string()));
        }
        if let Some(grade) = non_blank(&self.grade) {
            fields.push(("Grade", grade.to_string()));
        }
        if let Some(url) = non_blank(&self.source_url) {
            fields.push(("Source", url.to_string()));
        }
        fields
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Credibility verdict for one [`ScoreRequest`].
pub struct ScoreResult {
    /// Score as stated by the model.
    pub score: f32,
    /// Denominator the model used (`10` for "8/10").
    pub scale: f32,
    /// Non-empty justification text.
    pub rationale: String,
    /// Model that produced the verdict.
    pub model: String,
}

impl ScoreResult {
    /// Score mapped onto 0..100.
    pub fn normalized(&self) -> f32 {
        (self.score / self.scale * 100.0).clamp(0.0, 100.0)
    }
}

impl std::fmt::Display for ScoreResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{} ({})", self.score, self.scale, self.rationale)
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Fields extracted from a model reply before the model name is attached.
pub struct ParsedScore {
    pub score: f32,
    pub scale: f32,
    pub rationale: String,
}
