//! Completion API access.
//!
//! [`CompletionClient`] is the seam between prompt-building code and the
//! network. [`PerplexityClient`] talks to the real API; the mock answers from
//! a queue and records prompts.

pub mod error;
pub mod mock;
pub mod perplexity;
pub mod types;


pub use error::{AuthError, ClientError};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockCompletionClient;
pub use perplexity::PerplexityClient;
pub use types::{ClientConfig, Completion, Prompt};

/// A chat completion backend.
pub trait CompletionClient: Send + Sync {
    /// Model name the client sends with each request.
    fn model(&self) -> &str;

    /// Returns `true` if a usable key is configured.
    fn has_api_key(&self) -> bool;

    /// Sends `prompt` and returns the answer text plus citations.
    ///
    /// Implementations must fail with [`AuthError::MissingKey`] before any
    /// network activity when no key is configured.
    fn complete(
        &self,
        prompt: &Prompt,
    ) -> impl std::future::Future<Output = Result<Completion, ClientError>> + Send;
}

impl<C: CompletionClient> CompletionClient for std::sync::Arc<C> {
    fn model(&self) -> &str {
        (**self).model()
    }

    fn has_api_key(&self) -> bool {
        (**self).has_api_key()
    }

    fn complete(
        &self,
        prompt: &Prompt,
    ) -> impl std::future::Future<Output = Result<Completion, ClientError>> + Send {
        (**self).complete(prompt)
    }
}
