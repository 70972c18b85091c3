//! Agent execution against the LLM provider
//!
//! One executor instance is shared by all requests; it owns the provider
//! handle and the model settings from configuration. Execution is a single
//! blocking round-trip per task, with no retry and no fallback.

use crate::agents::definition::{AgentDefinition, TaskDefinition};
use crate::llm::provider::{
    CompletionRequest, LlmError, LlmProvider, Message, MessageRole,
};
use crate::observability::metrics::metrics;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn, Instrument};

/// Executes agent tasks through the configured LLM provider
pub struct AgentExecutor {
    provider: Arc<dyn LlmProvider>,
    model: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl AgentExecutor {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        model: String,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
    ) -> Self {
        Self {
            provider,
            model,
            temperature,
            max_tokens,
        }
    }

    /// Provider name, for logs and the liveness banner
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Run one agent task and return the generated text
    ///
    /// Provider failures propagate unchanged to the caller; the HTTP layer
    /// turns them into a generic server error.
    pub async fn execute(
        &self,
        agent: &AgentDefinition,
        task: &TaskDefinition,
    ) -> Result<String, LlmError> {
        let request = CompletionRequest {
            messages: vec![
                Message {
                    role: MessageRole::System,
                    content: agent.system_prompt(),
                },
                Message {
                    role: MessageRole::User,
                    content: task.user_prompt(),
                },
            ],
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            top_p: None,
            stop_sequences: None,
        };

        debug!(
            role = %agent.role,
            model = %self.model,
            instruction_bytes = task.description.len(),
            "Dispatching generation call"
        );

        let started = Instant::now();
        metrics().record_generation_call();

        let span = crate::stage_span!(role = %agent.role, model = %self.model);
        let response = match self.provider.complete(request).instrument(span).await {
            Ok(response) => response,
            Err(e) => {
                metrics().record_generation_failure();
                warn!(
                    role = %agent.role,
                    error = %crate::error::sanitize_error_message(&e.to_string()),
                    "Generation call failed"
                );
                return Err(e);
            }
        };

        info!(
            role = %agent.role,
            elapsed_ms = started.elapsed().as_millis() as u64,
            prompt_tokens = response.usage.prompt_tokens,
            completion_tokens = response.usage.completion_tokens,
            "Generation call completed"
        );

        Ok(response.content)
    }
}
