//! Agent and task primitives for the prompt pipeline

pub mod definition;
pub mod executor;

pub use definition::{AgentDefinition, TaskDefinition};
pub use executor::AgentExecutor;
