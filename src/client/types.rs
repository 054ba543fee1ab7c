use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_MODEL, DEFAULT_REQUEST_TIMEOUT_SECS, RAW_ANSWER_FALLBACK_CHARS,
};

use super::error::ClientError;

/// Settings for a completion client. The key is passed in explicitly; the
/// client never reads the environment itself.
#[derive(Clone)]
pub struct ClientConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_API_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the key if it is present and not blank.
    pub fn usable_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    /// Full chat completions endpoint for this base URL.
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// A two-message chat prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

impl Prompt {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }
}

/// Answer text plus any citations the API attached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub answer: String,
    pub citations: Vec<String>,
    /// False when the body had no `choices[0].message.content` and `answer`
    /// holds the truncated raw body instead.
    #[serde(default)]
    pub has_content: bool,
}

impl Completion {
    pub fn text(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            citations: Vec::new(),
            has_content: true,
        }
    }

    pub fn with_citations(mut self, citations: Vec<String>) -> Self {
        self.citations = citations;
        self
    }

    /// Decodes a chat completions body.
    ///
    /// The answer is `choices[0].message.content`; without it the raw body
    /// (truncated) stands in and `has_content` is false. Citations come from
    /// the top level first, then from the first message.
    pub fn from_response_body(body: &str) -> Result<Self, ClientError> {
        let value: serde_json::Value =
            serde_json::from_str(body).map_err(|e| ClientError::MalformedResponse {
                message: e.to_string(),
            })?;

        let wire: WireResponse = serde_json::from_value(value.clone()).unwrap_or_default();
        let first = wire.choices.into_iter().next().and_then(|c| c.message);

        let (answer, has_content) = match first.as_ref().and_then(|m| m.content.clone()) {
            Some(content) => (content, true),
            None => (
                value.to_string().chars().take(RAW_ANSWER_FALLBACK_CHARS).collect(),
                false,
            ),
        };

        let citations = wire
            .citations
            .filter(|c| !c.is_empty())
            .or_else(|| first.and_then(|m| m.citations))
            .unwrap_or_default();

        Ok(Self {
            answer,
            citations,
            has_content,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct WireResponse {
    #[serde(default)]
    choices: Vec<WireChoice>,
    #[serde(default)]
    citations: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    #[serde(default)]
    message: Option<WireMessage>,
}

#[derive(Debug, Deserialize)]
struct WireMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    citations: Option<Vec<String>>,
}
