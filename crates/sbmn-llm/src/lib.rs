//! SBMN LLM Provider Layer
//!
//! Pluggable language-model providers and the automated domain expert built
//! on top of them.
//!
//! # Architecture
//!
//! This crate provides implementations of the `LlmProvider` trait from
//! `sbmn-domain`, and [`LlmExpert`], the `DomainExpert` that turns an
//! interview question into a conversation with any provider.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OllamaProvider`: Local Ollama API integration
//! - `GeminiProvider`: Google Gemini API integration
//!
//! # Examples
//!
//! ```
//! use sbmn_llm::{LlmExpert, MockProvider};
//! use sbmn_domain::{DomainExpert, ProcessContext, ResponseFormat};
//!
//! let expert = LlmExpert::new(MockProvider::new("Sim"));
//! let context = ProcessContext::new("Venda Online", "Varejo");
//! let answer = expert.ask(&context, "A tarefa 'B' depende de 'A' para ocorrer?", ResponseFormat::Binary);
//! assert_eq!(answer, "Sim");
//! ```

#![warn(missing_docs)]

pub mod expert;
pub mod gemini;
pub mod ollama;

use sbmn_domain::traits::{ChatRole, ChatTurn, LlmProvider as LlmProviderTrait};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

pub use expert::{expert_conversation, LlmExpert, COMMUNICATION_ERROR_ANSWER};
pub use gemini::GeminiProvider;
pub use ollama::OllamaProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request rejected by the provider
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Missing or rejected credentials
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Drive an async provider call to completion from synchronous code
///
/// Must not be called from within a tokio runtime.
pub(crate) fn block_on<F: Future>(future: F) -> Result<F::Output, LlmError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| LlmError::Other(format!("Failed to start runtime: {}", e)))?;
    Ok(runtime.block_on(future))
}

/// The last interviewer turn of a conversation, i.e. the question being asked
pub(crate) fn last_user_turn(conversation: &[ChatTurn]) -> &str {
    conversation
        .iter()
        .rev()
        .find(|turn| turn.role == ChatRole::User)
        .map(|turn| turn.text.as_str())
        .unwrap_or("")
}

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Fail,
}

/// Mock LLM provider for deterministic testing
///
/// This provider returns pre-configured responses without making any network
/// calls. Specific responses are keyed by the last interviewer turn, which is
/// the question text when used through [`LlmExpert`].
///
/// # Examples
///
/// ```
/// use sbmn_llm::MockProvider;
/// use sbmn_domain::traits::{ChatTurn, LlmProvider};
///
/// let mut provider = MockProvider::new("Não");
/// provider.add_response("question 1", "Sim");
///
/// assert_eq!(provider.generate(&[ChatTurn::user("question 1")]).unwrap(), "Sim");
/// assert_eq!(provider.generate(&[ChatTurn::user("question 2")]).unwrap(), "Não");
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, MockReply>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all questions
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Add a specific response for a given question
    pub fn add_response(&mut self, question: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(question.into(), MockReply::Text(response.into()));
    }

    /// Configure to return an error for a specific question
    pub fn add_error(&mut self, question: impl Into<String>) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(question.into(), MockReply::Fail);
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *self.call_count.lock().unwrap_or_else(PoisonError::into_inner) = 0;
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Sim")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn generate(&self, conversation: &[ChatTurn]) -> Result<String, Self::Error> {
        *self.call_count.lock().unwrap_or_else(PoisonError::into_inner) += 1;

        let question = last_user_turn(conversation);
        let responses = self.responses.lock().unwrap_or_else(PoisonError::into_inner);
        match responses.get(question) {
            Some(MockReply::Text(response)) => Ok(response.clone()),
            Some(MockReply::Fail) => Err(LlmError::Communication("Mock error".to_string())),
            None => Ok(self.default_response.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ask(provider: &MockProvider, question: &str) -> Result<String, LlmError> {
        provider.generate(&[
            ChatTurn::user("persona"),
            ChatTurn::model("ok"),
            ChatTurn::user(question),
        ])
    }

    #[test]
    fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        assert_eq!(ask(&provider, "any question").unwrap(), "Test response");
    }

    #[test]
    fn test_mock_provider_specific_responses() {
        let mut provider = MockProvider::default();
        provider.add_response("hello", "world");
        provider.add_response("foo", "bar");

        assert_eq!(ask(&provider, "hello").unwrap(), "world");
        assert_eq!(ask(&provider, "foo").unwrap(), "bar");
        assert_eq!(ask(&provider, "unknown").unwrap(), "Sim");
    }

    #[test]
    fn test_mock_provider_keys_on_last_user_turn() {
        let mut provider = MockProvider::default();
        provider.add_response("persona", "wrong");
        assert_eq!(ask(&provider, "question").unwrap(), "Sim");
    }

    #[test]
    fn test_mock_provider_call_count() {
        let provider = MockProvider::new("test");

        assert_eq!(provider.call_count(), 0);

        ask(&provider, "prompt1").unwrap();
        assert_eq!(provider.call_count(), 1);

        ask(&provider, "prompt2").unwrap();
        assert_eq!(provider.call_count(), 2);

        provider.reset_call_count();
        assert_eq!(provider.call_count(), 0);
    }

    #[test]
    fn test_mock_provider_error() {
        let mut provider = MockProvider::default();
        provider.add_error("bad question");

        let result = ask(&provider, "bad question");
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }

    #[test]
    fn test_mock_provider_clone() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        ask(&provider1, "test").unwrap();

        // Both should share the same call count due to Arc
        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }

    #[test]
    fn test_last_user_turn_empty_conversation() {
        assert_eq!(last_user_turn(&[]), "");
        assert_eq!(last_user_turn(&[ChatTurn::system("rules")]), "");
    }
}
