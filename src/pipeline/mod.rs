//! Multi-stage prompt pipeline
//!
//! Stage templates are pure functions over prior outputs; the orchestrator
//! is a fixed sequence of executor calls per flow.

pub mod orchestrator;
pub mod stages;

pub use orchestrator::{StudyMaterial, StudyPipeline, DEFAULT_NUM_MCQS};
