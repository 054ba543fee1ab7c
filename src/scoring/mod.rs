//! Card description scoring via the completion API.
//!
//! [`Scorer`] formats a [`ScoreRequest`] into a prompt, delegates to a
//! [`CompletionClient`](crate::client::CompletionClient) and parses the reply
//! into a [`ScoreResult`]. A reply without a well-formed score line is a
//! [`ScoringError::Parse`]; the scorer never guesses a number.

pub mod error;
pub mod scorer;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::ScoringError;
pub use scorer::{Scorer, parse_score_response};
pub use types::{ParsedScore, ScoreRequest, ScoreResult};
