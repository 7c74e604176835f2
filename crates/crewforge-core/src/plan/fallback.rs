use crate::constants::{process, tools};
use crate::plan::{AgentSpec, PlanDocument, TaskSpec};

const RESEARCHER: &str = "Researcher";
const WRITER: &str = "Writer";

/// Default research-then-write plan used when no model design is usable.
/// The goal is interpolated verbatim into both task descriptions.
pub fn fallback(goal: &str) -> PlanDocument {
    PlanDocument {
        agents: vec![
            AgentSpec {
                role: RESEARCHER.to_string(),
                goal: "Research thoroughly about the given topic".to_string(),
                backstory: "You are an expert researcher with years of experience".to_string(),
                tools: vec![tools::EXA_SEARCH.to_string()],
            },
            AgentSpec {
                role: WRITER.to_string(),
                goal: "Create high-quality content based on research".to_string(),
                backstory: "You are a skilled writer who creates engaging content".to_string(),
                tools: Vec::new(),
            },
        ],
        tasks: vec![
            TaskSpec {
                description: format!("Research information about: {goal}"),
                expected_output: "Comprehensive research findings".to_string(),
                agent_role: RESEARCHER.to_string(),
            },
            TaskSpec {
                description: format!("Create content about: {goal} based on the research"),
                expected_output: "Well-written content".to_string(),
                agent_role: WRITER.to_string(),
            },
        ],
        process: process::SEQUENTIAL.to_string(),
    }
}
