//! studygen - Study Material Generator service
//!
//! An HTTP/JSON service that turns raw study text into exam-oriented study
//! material by chaining role-bound prompts through an LLM provider.
//!
//! # Overview
//!
//! This crate provides:
//! - A narrow LLM provider abstraction with a Gemini implementation
//! - Agent and task primitives for role-bound prompt construction
//! - A strictly sequential multi-stage generation pipeline
//! - A warp HTTP surface with permissive CORS
//! - Structured logging and metrics
//!
//! # Quick Start
//!
//! ```rust
//! use studygen::pipeline::stages;
//!
//! // Stage instructions are pure functions over prior outputs
//! let topics = "Main Topic 1:\n  - Subtopic 1";
//! let task = stages::notes_task(topics, "chapter text");
//! assert!(task.description.contains(topics));
//!
//! let mcqs = stages::mcq_task("notes text", 5);
//! assert!(mcqs.description.contains("Create around 5 MCQs."));
//! ```

pub mod agents;
pub mod config;
pub mod error;
pub mod llm;
pub mod observability;
pub mod pipeline;
pub mod server;
pub mod testing;

pub use agents::{AgentDefinition, AgentExecutor, TaskDefinition};
pub use config::{ConfigError, ServiceConfig};
pub use error::{ServiceError, ServiceResult};
pub use pipeline::{StudyMaterial, StudyPipeline};
