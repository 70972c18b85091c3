//! Mock implementations for testing
//!
//! Provides a deterministic LlmProvider that records every completion
//! request it receives, so tests can assert on instruction contents and
//! call ordering without any external service.

use crate::llm::provider::{
    CompletionRequest, CompletionResponse, FinishReason, LlmError, LlmProvider, TokenUsage,
};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Mock LLM provider that scripts responses and records requests
#[derive(Debug)]
pub struct RecordingProvider {
    pub responses: Vec<String>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
    current_response: Arc<Mutex<usize>>,
    should_fail: bool,
    fail_when_exhausted: bool,
    echo: bool,
    delay: Option<Duration>,
}

impl RecordingProvider {
    /// Script one response per expected call, cycling if called more often
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses,
            requests: Arc::new(Mutex::new(Vec::new())),
            current_response: Arc::new(Mutex::new(0)),
            should_fail: false,
            fail_when_exhausted: false,
            echo: false,
            delay: None,
        }
    }

    /// Fail every call
    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Self::new(vec![])
        }
    }

    /// Serve the scripted responses, then fail once they run out
    pub fn failing_after(responses: Vec<String>) -> Self {
        Self {
            fail_when_exhausted: true,
            ..Self::new(responses)
        }
    }

    /// Sleep before answering each call
    pub fn with_delay(responses: Vec<String>, delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new(responses)
        }
    }

    /// Answer each call with its own user prompt, after an optional sleep
    ///
    /// Lets concurrency tests attribute every response to the request that
    /// produced it.
    pub fn echoing_with_delay(delay: Duration) -> Self {
        Self {
            echo: true,
            delay: Some(delay),
            ..Self::new(vec![])
        }
    }

    /// Every completion request received so far, in call order
    pub async fn recorded_requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().await.clone()
    }

    /// Number of completion calls received
    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }
}

impl Default for RecordingProvider {
    fn default() -> Self {
        Self::new(vec![])
    }
}

#[async_trait]
impl LlmProvider for RecordingProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn available_models(&self) -> Vec<String> {
        vec!["mock-model".to_string()]
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let user_prompt = request
            .messages
            .iter()
            .rev()
            .find(|m| m.role == crate::llm::provider::MessageRole::User)
            .map(|m| m.content.clone())
            .unwrap_or_default();

        self.requests.lock().await.push(request);

        if self.should_fail {
            return Err(LlmError::RequestFailed("Mock LLM failure".to_string()));
        }

        let index = {
            let mut current = self.current_response.lock().await;
            let index = *current;
            *current += 1;
            index
        };

        if self.fail_when_exhausted && index >= self.responses.len() {
            return Err(LlmError::RequestFailed(
                "Mock responses exhausted".to_string(),
            ));
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let content = if self.echo {
            user_prompt
        } else if self.responses.is_empty() {
            "Mock response".to_string()
        } else {
            self.responses[index % self.responses.len()].clone()
        };

        Ok(CompletionResponse {
            content,
            model: "mock-model".to_string(),
            usage: TokenUsage {
                prompt_tokens: 10,
                completion_tokens: 5,
                total_tokens: 15,
            },
            finish_reason: FinishReason::Stop,
        })
    }

    async fn health_check(&self) -> Result<(), LlmError> {
        if self.should_fail {
            Err(LlmError::RequestFailed(
                "Mock health check failure".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::provider::{Message, MessageRole};

    fn request(content: &str) -> CompletionRequest {
        CompletionRequest {
            messages: vec![Message {
                role: MessageRole::User,
                content: content.to_string(),
            }],
            model: "mock-model".to_string(),
            max_tokens: None,
            temperature: None,
            top_p: None,
            stop_sequences: None,
        }
    }

    #[tokio::test]
    async fn test_responses_are_served_in_order() {
        let provider = RecordingProvider::new(vec!["one".to_string(), "two".to_string()]);

        let first = provider.complete(request("a")).await.unwrap();
        let second = provider.complete(request("b")).await.unwrap();

        assert_eq!(first.content, "one");
        assert_eq!(second.content, "two");
    }

    #[tokio::test]
    async fn test_requests_are_recorded_in_call_order() {
        let provider = RecordingProvider::new(vec![]);

        provider.complete(request("first")).await.unwrap();
        provider.complete(request("second")).await.unwrap();

        let recorded = provider.recorded_requests().await;
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].messages[0].content, "first");
        assert_eq!(recorded[1].messages[0].content, "second");
    }

    #[tokio::test]
    async fn test_failure_mode_records_the_request() {
        let provider = RecordingProvider::with_failure();

        let result = provider.complete(request("doomed")).await;
        assert!(result.is_err());
        assert_eq!(provider.call_count().await, 1);
    }

    #[tokio::test]
    async fn test_failing_after_exhausts_scripted_responses() {
        let provider = RecordingProvider::failing_after(vec!["only".to_string()]);

        assert!(provider.complete(request("a")).await.is_ok());
        assert!(provider.complete(request("b")).await.is_err());
    }
}
