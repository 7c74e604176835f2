use crate::error::CrewError;
use crate::plan::AgentSpec;
use crate::tools::{Tool, ToolDefinition, ToolRegistry};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// An executable agent: its persona plus the tools it may call.
pub struct AgentHandle {
    pub role: String,
    pub goal: String,
    pub backstory: String,
    tools: Vec<Arc<dyn Tool>>,
}

impl AgentHandle {
    pub fn new(
        role: impl Into<String>,
        goal: impl Into<String>,
        backstory: impl Into<String>,
        tools: Vec<Arc<dyn Tool>>,
    ) -> Self {
        Self {
            role: role.into(),
            goal: goal.into(),
            backstory: backstory.into(),
            tools,
        }
    }

    pub fn tools(&self) -> &[Arc<dyn Tool>] {
        &self.tools
    }

    pub fn tool(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn tool_definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.to_definition()).collect()
    }
}

impl fmt::Debug for AgentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentHandle")
            .field("role", &self.role)
            .field("goal", &self.goal)
            .field("backstory", &self.backstory)
            .field("tools", &self.tool_names())
            .finish()
    }
}

/// Role → agent mapping that remembers declaration order.
#[derive(Debug, Default)]
pub struct AgentRoster {
    agents: Vec<Arc<AgentHandle>>,
    index: HashMap<String, usize>,
}

impl AgentRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an agent; a role that is already present is rejected.
    pub fn insert(&mut self, agent: AgentHandle) -> Result<Arc<AgentHandle>, CrewError> {
        if self.index.contains_key(&agent.role) {
            return Err(CrewError::DuplicateRole(agent.role));
        }
        let agent = Arc::new(agent);
        self.index.insert(agent.role.clone(), self.agents.len());
        self.agents.push(Arc::clone(&agent));
        Ok(agent)
    }

    pub fn get(&self, role: &str) -> Option<&Arc<AgentHandle>> {
        self.index.get(role).map(|&i| &self.agents[i])
    }

    pub fn contains(&self, role: &str) -> bool {
        self.index.contains_key(role)
    }

    pub fn roles(&self) -> Vec<&str> {
        self.agents.iter().map(|a| a.role.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<AgentHandle>> {
        self.agents.iter()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

/// A tool name in a plan that the registry does not know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownToolWarning {
    pub role: String,
    pub tool: String,
}

impl fmt::Display for UnknownToolWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "agent '{}' requested unknown tool '{}'; continuing without it",
            self.role, self.tool
        )
    }
}

#[derive(Debug)]
pub struct BoundAgents {
    pub agents: AgentRoster,
    pub warnings: Vec<UnknownToolWarning>,
}

/// Resolve each spec's tools and build the role → agent mapping.
///
/// Unknown tool names are dropped and reported in `warnings`; a repeated role
/// fails the whole binding with [`CrewError::DuplicateRole`].
pub fn bind_agents(specs: &[AgentSpec], registry: &ToolRegistry) -> Result<BoundAgents, CrewError> {
    let mut agents = AgentRoster::new();
    let mut warnings = Vec::new();

    for spec in specs {
        if agents.contains(&spec.role) {
            return Err(CrewError::DuplicateRole(spec.role.clone()));
        }

        let mut tools = Vec::with_capacity(spec.tools.len());
        for name in &spec.tools {
            match registry.resolve(name) {
                Some(tool) => tools.push(tool),
                None => {
                    tracing::warn!(role = %spec.role, tool = %name, "Unknown tool requested by plan");
                    warnings.push(UnknownToolWarning {
                        role: spec.role.clone(),
                        tool: name.clone(),
                    });
                }
            }
        }

        agents.insert(AgentHandle::new(
            spec.role.clone(),
            spec.goal.clone(),
            spec.backstory.clone(),
            tools,
        ))?;
    }

    Ok(BoundAgents { agents, warnings })
}
