//! Team designs proposed by the language model.
//!
//! A [`PlanDocument`] is the only artifact that crosses from text extraction
//! into crew binding. It is deserialized with strict types so malformed model
//! output is rejected at the parse boundary and replaced by the fallback plan.

mod extractor;
mod fallback;

pub use extractor::{normalize, PlanExtractor, PlanSource, PLANNER_SYSTEM_PROMPT};
pub use fallback::fallback;

use crate::constants::process;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSpec {
    pub role: String,
    pub goal: String,
    pub backstory: String,
    #[serde(default, deserialize_with = "tools_or_default")]
    pub tools: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSpec {
    pub description: String,
    #[serde(alias = "expectedOutput")]
    pub expected_output: String,
    #[serde(alias = "agentRole")]
    pub agent_role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanDocument {
    pub agents: Vec<AgentSpec>,
    pub tasks: Vec<TaskSpec>,
    #[serde(default = "default_process", deserialize_with = "process_or_default")]
    pub process: String,
}

fn default_process() -> String {
    process::SEQUENTIAL.to_string()
}

/// `"process": null` reads the same as a missing field.
fn process_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_process))
}

/// `"tools": null` means the agent needs no tools.
fn tools_or_default<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Why a piece of model output could not be used as a plan.
#[derive(Debug, thiserror::Error)]
pub(crate) enum PlanParseError {
    #[error("not a valid plan document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("plan declares no agents")]
    NoAgents,

    #[error("plan declares no tasks")]
    NoTasks,
}

impl PlanDocument {
    /// Deserialize and structurally check a candidate document.
    pub(crate) fn parse(text: &str) -> Result<Self, PlanParseError> {
        let plan: PlanDocument = serde_json::from_str(text)?;
        if plan.agents.is_empty() {
            return Err(PlanParseError::NoAgents);
        }
        if plan.tasks.is_empty() {
            return Err(PlanParseError::NoTasks);
        }
        Ok(plan)
    }

    pub fn agent_roles(&self) -> impl Iterator<Item = &str> {
        self.agents.iter().map(|a| a.role.as_str())
    }
}
