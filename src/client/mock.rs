#![cfg(any(test, feature = "mock"))]

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::constants::DEFAULT_MODEL;

use super::CompletionClient;
use super::error::{AuthError, ClientError};
use super::types::{Completion, Prompt};

const MOCK_ENDPOINT: &str = "mock://completions";

/// In-memory completion client. Replies are served in FIFO order.
#[derive(Debug)]
pub struct MockCompletionClient {
    model: String,
    has_key: bool,
    replies: Mutex<VecDeque<Result<Completion, ClientError>>>,
    prompts: Mutex<Vec<Prompt>>,
}

impl Default for MockCompletionClient {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            has_key: true,
            replies: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

impl MockCompletionClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// A client that behaves as if no key were configured.
    pub fn without_key() -> Self {
        Self {
            has_key: false,
            ..Self::default()
        }
    }

    /// Convenience: a client that answers once with `answer`.
    pub fn replying(answer: impl Into<String>) -> Self {
        let client = Self::new();
        client.push_reply(Completion::text(answer));
        client
    }

    pub fn push_reply(&self, completion: Completion) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(Ok(completion));
        }
    }

    pub fn push_error(&self, error: ClientError) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(Err(error));
        }
    }

    /// Number of requests that reached the (mock) network.
    pub fn calls(&self) -> usize {
        self.prompts.lock().map(|p| p.len()).unwrap_or(0)
    }

    /// Prompts received so far.
    pub fn prompts(&self) -> Vec<Prompt> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

impl CompletionClient for MockCompletionClient {
    fn model(&self) -> &str {
        &self.model
    }

    fn has_api_key(&self) -> bool {
        self.has_key
    }

    async fn complete(&self, prompt: &Prompt) -> Result<Completion, ClientError> {
        if !self.has_key {
            return Err(AuthError::MissingKey.into());
        }

        self.prompts
            .lock()
            .map_err(|_| ClientError::network(MOCK_ENDPOINT, "lock poisoned"))?
            .push(prompt.clone());

        self.replies
            .lock()
            .map_err(|_| ClientError::network(MOCK_ENDPOINT, "lock poisoned"))?
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::network(MOCK_ENDPOINT, "no reply queued")))
    }
}
