use async_openai::types::chat::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequest,
    CreateChatCompletionRequestArgs,
};
use reqwest::StatusCode;
use tracing::{debug, info, warn};

use crate::constants::{DEFAULT_TEMPERATURE, DEFAULT_TOP_P};

use super::CompletionClient;
use super::error::{AuthError, ClientError};
use super::types::{ClientConfig, Completion, Prompt};

/// Longest slice of an error body kept in a [`ClientError::Network`] message.
const ERROR_BODY_PREVIEW_CHARS: usize = 300;

#[derive(Clone)]
/// Perplexity chat completions client.
pub struct PerplexityClient {
    http: reqwest::Client,
    config: ClientConfig,
    endpoint: String,
}

impl std::fmt::Debug for PerplexityClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PerplexityClient")
            .field("config", &self.config)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl PerplexityClient {
    /// Creates a client. Does not check the key; that happens per call.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::InvalidRequest {
                message: format!("failed to build HTTP client: {}", e),
            })?;
        let endpoint = config.endpoint();

        Ok(Self {
            http,
            config,
            endpoint,
        })
    }

    /// Returns the configured endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Builds the OpenAI-compatible request body for `prompt`.
    pub fn build_request(&self, prompt: &Prompt) -> Result<CreateChatCompletionRequest, ClientError> {
        if prompt.user.trim().is_empty() {
            return Err(ClientError::InvalidRequest {
                message: "user prompt cannot be empty".to_string(),
            });
        }

        let system = ChatCompletionRequestSystemMessageArgs::default()
            .content(prompt.system.as_str())
            .build()
            .map_err(invalid)?;
        let user = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt.user.as_str())
            .build()
            .map_err(invalid)?;

        CreateChatCompletionRequestArgs::default()
            .model(self.config.model.as_str())
            .messages([
                ChatCompletionRequestMessage::System(system),
                ChatCompletionRequestMessage::User(user),
            ])
            .temperature(DEFAULT_TEMPERATURE)
            .top_p(DEFAULT_TOP_P)
            .build()
            .map_err(invalid)
    }
}

fn invalid(err: impl std::fmt::Display) -> ClientError {
    ClientError::InvalidRequest {
        message: err.to_string(),
    }
}

impl CompletionClient for PerplexityClient {
    fn model(&self) -> &str {
        &self.config.model
    }

    fn has_api_key(&self) -> bool {
        self.config.usable_key().is_some()
    }

    async fn complete(&self, prompt: &Prompt) -> Result<Completion, ClientError> {
        let key = self.config.usable_key().ok_or(AuthError::MissingKey)?;
        let request = self.build_request(prompt)?;

        debug!(
            endpoint = %self.endpoint,
            model = %self.config.model,
            prompt_len = prompt.user.len(),
            "Sending completion request"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ClientError::network(&self.endpoint, e))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            warn!(status = status.as_u16(), "Completion API rejected the key");
            return Err(AuthError::Rejected {
                status: status.as_u16(),
            }
            .into());
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let preview: String = body.chars().take(ERROR_BODY_PREVIEW_CHARS).collect();
            warn!(status = status.as_u16(), "Completion API returned an error status");
            return Err(ClientError::Network {
                url: self.endpoint.clone(),
                status: Some(status.as_u16()),
                message: format!("HTTP {}: {}", status.as_u16(), preview),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ClientError::network(&self.endpoint, e))?;
        let completion = Completion::from_response_body(&body)?;

        info!(
            answer_len = completion.answer.len(),
            citations = completion.citations.len(),
            "Completion received"
        );

        Ok(completion)
    }
}
