//! Agent and task definitions
//!
//! An agent is a fixed descriptive identity used to bias generation style;
//! a task is one natural-language instruction block handed to that agent.
//! Both are plain data, built fresh for every pipeline stage.

/// A role-bound persona for one generation stage
#[derive(Debug, Clone, PartialEq)]
pub struct AgentDefinition {
    /// Role name, e.g. "Topic Analyzer"
    pub role: String,
    /// One-line goal statement
    pub goal: String,
    /// Persona backstory text
    pub backstory: String,
}

impl AgentDefinition {
    pub fn new(
        role: impl Into<String>,
        goal: impl Into<String>,
        backstory: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            goal: goal.into(),
            backstory: backstory.into(),
        }
    }

    /// Render the agent into a system prompt
    pub fn system_prompt(&self) -> String {
        format!(
            "You are {role}. {backstory}\n\nYour goal: {goal}",
            role = self.role,
            backstory = self.backstory,
            goal = self.goal
        )
    }
}

/// One instruction block assigned to an agent
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDefinition {
    /// Full instruction body, including any embedded prior-stage output
    pub description: String,
    /// Description of the shape the output should take
    pub expected_output: String,
}

impl TaskDefinition {
    pub fn new(description: impl Into<String>, expected_output: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            expected_output: expected_output.into(),
        }
    }

    /// Render the task into a user prompt
    pub fn user_prompt(&self) -> String {
        format!(
            "{description}\n\nEXPECTED OUTPUT:\n{expected_output}",
            description = self.description,
            expected_output = self.expected_output
        )
    }
}
