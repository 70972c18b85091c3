//! Study material pipeline orchestration
//!
//! The orchestrator owns the fixed stage sequence for each flow and feeds
//! each stage's output into the next stage's instruction. Stages run
//! strictly in order because every instruction textually embeds the
//! previous stage's full output.

use crate::agents::executor::AgentExecutor;
use crate::llm::provider::LlmError;
use crate::observability::metrics::metrics;
use crate::pipeline::stages;
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

/// Default number of MCQs when the caller does not specify one
pub const DEFAULT_NUM_MCQS: i64 = 5;

/// Final payload of the three-stage flow
///
/// Each field holds the corresponding stage's raw output verbatim; no
/// post-parsing and no validation that the text matches the requested
/// format.
#[derive(Debug, Clone, Serialize)]
pub struct StudyMaterial {
    pub topics: String,
    pub notes: String,
    pub mcqs: String,
}

/// Orchestrates the generation flows over a shared executor
pub struct StudyPipeline {
    executor: AgentExecutor,
}

impl StudyPipeline {
    pub fn new(executor: AgentExecutor) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &AgentExecutor {
        &self.executor
    }

    /// Single-stage summarization flow
    #[instrument(skip(self, text), fields(request_id = %Uuid::new_v4(), input_bytes = text.len()))]
    pub async fn summarize(&self, text: &str) -> Result<String, LlmError> {
        let summary = self
            .executor
            .execute(&stages::summarizer_agent(), &stages::summarize_task(text))
            .await?;

        metrics().record_summary_generated();
        info!(summary_bytes = summary.len(), "Summarization flow completed");
        Ok(summary)
    }

    /// Three-stage study material flow: topics, then notes, then MCQs
    ///
    /// A failure in any stage fails the whole request; earlier stage
    /// outputs are never returned on their own.
    #[instrument(skip(self, text), fields(request_id = %Uuid::new_v4(), input_bytes = text.len()))]
    pub async fn generate_study_material(
        &self,
        text: &str,
        num_mcqs: i64,
    ) -> Result<StudyMaterial, LlmError> {
        let topics = self
            .executor
            .execute(
                &stages::topic_analyzer_agent(),
                &stages::topic_task(text),
            )
            .await?;
        info!(stage = "topics", output_bytes = topics.len(), "Stage completed");

        let notes = self
            .executor
            .execute(
                &stages::notes_maker_agent(),
                &stages::notes_task(&topics, text),
            )
            .await?;
        info!(stage = "notes", output_bytes = notes.len(), "Stage completed");

        let mcqs = self
            .executor
            .execute(
                &stages::mcq_creator_agent(),
                &stages::mcq_task(&notes, num_mcqs),
            )
            .await?;
        info!(stage = "mcqs", output_bytes = mcqs.len(), "Stage completed");

        metrics().record_study_set_generated();
        Ok(StudyMaterial {
            topics,
            notes,
            mcqs,
        })
    }
}
