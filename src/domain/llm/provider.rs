//! LLM provider trait definition

use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::DomainError;

/// Trait for LLM text-generation providers (OpenAI, Anthropic, etc.)
#[async_trait]
pub trait LlmProvider: Send + Sync + Debug {
    /// Generate a completion for the prompt, halting at any stop sequence
    async fn generate(&self, prompt: &str, stop: &[String]) -> Result<String, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;

    /// Get the default model for this provider
    fn default_model(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// Scripted LLM provider for tests: responses are returned in the order
    /// they were queued, one per `generate` call.
    #[derive(Debug)]
    pub struct MockLlmProvider {
        name: &'static str,
        responses: Mutex<VecDeque<String>>,
        error: Option<String>,
    }

    impl MockLlmProvider {
        pub fn new(name: &'static str) -> Self {
            Self {
                name,
                responses: Mutex::new(VecDeque::new()),
                error: None,
            }
        }

        pub fn with_response(self, response: impl Into<String>) -> Self {
            self.responses
                .lock()
                .expect("mock lock poisoned")
                .push_back(response.into());
            self
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }
    }

    #[async_trait]
    impl LlmProvider for MockLlmProvider {
        async fn generate(&self, _prompt: &str, _stop: &[String]) -> Result<String, DomainError> {
            if let Some(ref error) = self.error {
                return Err(DomainError::provider(self.name, error));
            }

            self.responses
                .lock()
                .expect("mock lock poisoned")
                .pop_front()
                .ok_or_else(|| DomainError::provider(self.name, "No mock response configured"))
        }

        fn provider_name(&self) -> &'static str {
            self.name
        }

        fn default_model(&self) -> &'static str {
            "mock-model"
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_responses_returned_in_order() {
            let provider = MockLlmProvider::new("test")
                .with_response("first")
                .with_response("second");

            assert_eq!(provider.generate("p", &[]).await.unwrap(), "first");
            assert_eq!(provider.generate("p", &[]).await.unwrap(), "second");
            assert!(provider.generate("p", &[]).await.is_err());
        }

        #[tokio::test]
        async fn test_error_takes_priority() {
            let provider = MockLlmProvider::new("test")
                .with_response("never")
                .with_error("down");

            assert!(provider.generate("p", &[]).await.is_err());
        }
    }
}
