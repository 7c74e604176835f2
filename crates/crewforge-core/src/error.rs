use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrewError {
    #[error("Missing credential for {name}: environment variable {env_var} is not set")]
    MissingCredential { name: String, env_var: String },

    #[error("Duplicate agent role in plan: '{0}'")]
    DuplicateRole(String),

    #[error("Task {task_index} references unknown agent role '{role}'")]
    UnknownAgentRole { role: String, task_index: usize },

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Tool error: {tool}: {message}")]
    Tool { tool: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Execution engine error: {0}")]
    Engine(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Agent exceeded maximum iterations ({0})")]
    MaxIterations(usize),
}

impl CrewError {
    pub fn tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Tool {
            tool: tool.into(),
            message: message.into(),
        }
    }

    pub fn missing_credential(name: impl Into<String>, env_var: impl Into<String>) -> Self {
        Self::MissingCredential {
            name: name.into(),
            env_var: env_var.into(),
        }
    }

    /// Errors that abort a run instead of being absorbed by the plan fallback.
    pub fn is_fatal_for_planning(&self) -> bool {
        matches!(self, Self::MissingCredential { .. })
    }
}

pub type Result<T> = std::result::Result<T, CrewError>;
