use crate::crew::agent::{AgentHandle, AgentRoster};
use crate::error::CrewError;
use crate::plan::TaskSpec;
use regex::Regex;
use std::sync::{Arc, LazyLock};

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^}]*\}").expect("valid regex"));

/// A unit of work bound to the agent that performs it.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    pub description: String,
    pub expected_output: String,
    agent: Arc<AgentHandle>,
}

impl TaskHandle {
    pub fn new(
        description: impl Into<String>,
        expected_output: impl Into<String>,
        agent: Arc<AgentHandle>,
    ) -> Self {
        Self {
            description: description.into(),
            expected_output: expected_output.into(),
            agent,
        }
    }

    pub fn agent(&self) -> &Arc<AgentHandle> {
        &self.agent
    }

    pub fn agent_role(&self) -> &str {
        &self.agent.role
    }
}

/// Delete every `{...}` span so no unresolved placeholder reaches execution.
///
/// `"Summarize {topic} findings"` becomes `"Summarize  findings"`.
pub fn sanitize_description(description: &str) -> String {
    PLACEHOLDER_RE.replace_all(description, "").into_owned()
}

/// Bind task specs to agents, preserving order.
pub fn bind_tasks(specs: &[TaskSpec], agents: &AgentRoster) -> Result<Vec<TaskHandle>, CrewError> {
    specs
        .iter()
        .enumerate()
        .map(|(task_index, spec)| {
            let agent = agents.get(&spec.agent_role).ok_or_else(|| {
                CrewError::UnknownAgentRole {
                    role: spec.agent_role.clone(),
                    task_index,
                }
            })?;

            let description = sanitize_description(&spec.description);
            if description != spec.description {
                tracing::debug!(task_index, "Removed placeholders from task description");
            }

            Ok(TaskHandle::new(
                description,
                spec.expected_output.clone(),
                Arc::clone(agent),
            ))
        })
        .collect()
}
