use crate::error::CrewError;
use crate::llm::LlmClient;
use crate::plan::{fallback, PlanDocument, PlanParseError};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Instruction sent with every goal. Tool names must match the registry.
pub const PLANNER_SYSTEM_PROMPT: &str = r#"You are an AI team architect who designs optimal agent teams for complex tasks.
For a given user goal, determine:
1. The necessary specialized agents (2-5 agents)
2. Each agent's role, goal, backstory and required tools
3. The specific tasks each agent should perform
4. The execution process (sequential or hierarchical)

Available tools:
- ExaSearchTool: advanced semantic web search
- WebsiteSearchTool: search the content of a specific website (query must include the URL)
- FileReadTool: read a local file
Only use these tool names. Agents that need no tools get an empty list.

Task descriptions must be plain text. Do NOT include template placeholders
such as {topic} or {variable}; write the concrete subject instead.
Every task's agent_role must exactly match the role of one of the agents.

Return ONLY valid JSON with this structure:
{
    "agents": [
        {
            "role": "Role name",
            "goal": "Agent's goal",
            "backstory": "Brief backstory",
            "tools": ["ToolName1", "ToolName2"]
        }
    ],
    "tasks": [
        {
            "description": "Task description in plain text",
            "expected_output": "Expected output description",
            "agent_role": "Which agent performs this"
        }
    ],
    "process": "sequential" or "hierarchical"
}"#;

/// How the returned plan was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanSource {
    /// The (normalized) model output parsed directly.
    Parsed,
    /// A JSON object embedded in surrounding text was recovered.
    Recovered,
    /// Model output was unusable; the default plan was substituted.
    Fallback,
}

/// Asks the language model for a team design and turns whatever comes back
/// into a usable [`PlanDocument`].
pub struct PlanExtractor {
    llm: Arc<dyn LlmClient>,
}

impl PlanExtractor {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    /// Produce a plan for `goal`.
    ///
    /// Unparseable output and ordinary model failures yield [`fallback`].
    /// Only a missing model credential is returned as an error.
    pub async fn extract(&self, goal: &str) -> Result<PlanDocument, CrewError> {
        self.extract_with_source(goal).await.map(|(plan, _)| plan)
    }

    pub async fn extract_with_source(
        &self,
        goal: &str,
    ) -> Result<(PlanDocument, PlanSource), CrewError> {
        let user_message = format!("Design an optimal AI agent team for this goal: {goal}");

        let raw = match self.llm.generate(PLANNER_SYSTEM_PROMPT, &user_message).await {
            Ok(raw) => raw,
            Err(e) if e.is_fatal_for_planning() => return Err(e),
            Err(e) => {
                warn!("Team design request failed, using default plan: {}", e);
                return Ok((fallback(goal), PlanSource::Fallback));
            }
        };

        Ok(Self::interpret(goal, &raw))
    }

    /// Turn raw model text into a plan. Never fails.
    pub fn interpret(goal: &str, raw: &str) -> (PlanDocument, PlanSource) {
        debug!("Raw team design: {}", raw);

        let text = normalize(raw);
        let first_error = match PlanDocument::parse(text) {
            Ok(plan) => {
                info!(
                    roles = ?plan.agent_roles().collect::<Vec<_>>(),
                    tasks = plan.tasks.len(),
                    process = %plan.process,
                    "Parsed team design"
                );
                return (plan, PlanSource::Parsed);
            }
            Err(e) => e,
        };

        match recover(text).map(PlanDocument::parse) {
            Some(Ok(plan)) => {
                info!(
                    roles = ?plan.agent_roles().collect::<Vec<_>>(),
                    tasks = plan.tasks.len(),
                    "Recovered team design embedded in model output"
                );
                (plan, PlanSource::Recovered)
            }
            Some(Err(e)) => Self::fall_back(goal, e),
            None => Self::fall_back(goal, first_error),
        }
    }

    fn fall_back(goal: &str, reason: PlanParseError) -> (PlanDocument, PlanSource) {
        warn!("Could not use model team design ({}), using default plan", reason);
        (fallback(goal), PlanSource::Fallback)
    }
}

/// Trim whitespace and a surrounding Markdown code fence.
pub fn normalize(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```") {
        text = match rest.get(..4) {
            Some(tag) if tag.eq_ignore_ascii_case("json") => &rest[4..],
            _ => rest,
        };
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

/// Greedy scan: first `{` through last `}`.
fn recover(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(&text[start..=end])
}
