//! Binding a [`PlanDocument`](crate::plan::PlanDocument) into executable
//! agents and tasks.

pub mod agent;
pub mod task;
pub mod topology;

pub use agent::{bind_agents, AgentHandle, AgentRoster, BoundAgents, UnknownToolWarning};
pub use task::{bind_tasks, sanitize_description, TaskHandle};
pub use topology::ExecutionTopology;

use crate::error::CrewError;
use crate::plan::PlanDocument;
use crate::tools::ToolRegistry;
use serde_json::Value;
use std::collections::HashMap;

/// Run-time values substituted into the crew at execution. Owned by the caller.
pub type Inputs = HashMap<String, Value>;

/// Everything the execution engine needs for one run.
#[derive(Debug)]
pub struct ExecutionPlan {
    pub agents: AgentRoster,
    pub tasks: Vec<TaskHandle>,
    pub topology: ExecutionTopology,
    pub warnings: Vec<UnknownToolWarning>,
}

impl ExecutionPlan {
    /// JSON view of the bound crew, for display.
    pub fn summary(&self) -> Value {
        serde_json::json!({
            "topology": self.topology.as_str(),
            "agents": self.agents.iter().map(|a| serde_json::json!({
                "role": a.role,
                "goal": a.goal,
                "backstory": a.backstory,
                "tools": a.tool_names(),
            })).collect::<Vec<_>>(),
            "tasks": self.tasks.iter().map(|t| serde_json::json!({
                "description": t.description,
                "expected_output": t.expected_output,
                "agent_role": t.agent_role(),
            })).collect::<Vec<_>>(),
            "warnings": self.warnings.iter().map(ToString::to_string).collect::<Vec<_>>(),
        })
    }
}

/// Bind agents, then tasks, then pick the topology. The first binding error
/// aborts; nothing is partially returned.
pub fn bind_plan(plan: &PlanDocument, registry: &ToolRegistry) -> Result<ExecutionPlan, CrewError> {
    let bound = bind_agents(&plan.agents, registry)?;
    let tasks = bind_tasks(&plan.tasks, &bound.agents)?;
    let topology = ExecutionTopology::select(Some(&plan.process));

    Ok(ExecutionPlan {
        agents: bound.agents,
        tasks,
        topology,
        warnings: bound.warnings,
    })
}
