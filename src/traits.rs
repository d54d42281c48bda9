use std::error::Error;

use async_trait::async_trait;

use crate::suggestion::Suggestion;

/// A service that proposes tasks from a free-text prompt.
///
/// This can be a remote service (see [`HttpSuggestionSource`](crate::client::HttpSuggestionSource)), or a mock (see [`MockSuggestionSource`](crate::mock::MockSuggestionSource)).
#[async_trait]
pub trait SuggestionSource {
    /// Returns the suggestions for this prompt, the most relevant first.
    /// This function may be a long process, that can fail (e.g. in case of a remote server)
    async fn suggest(&self, prompt: &str) -> Result<Vec<Suggestion>, Box<dyn Error>>;
}
