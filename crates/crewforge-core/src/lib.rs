pub mod error;
pub mod constants;
pub mod config;
pub mod llm;
pub mod tools;
pub mod plan;
pub mod crew;
pub mod engine;
pub mod orchestrator;

// Re-export key types
pub use error::{CrewError, Result};
pub use config::Settings;
pub use llm::{LlmClient, Message, Role, ToolCall};
pub use tools::{Tool, ToolDefinition, ToolRegistry, ToolResult};
pub use plan::{fallback, AgentSpec, PlanDocument, PlanExtractor, PlanSource, TaskSpec};
pub use crew::{
    bind_plan, AgentHandle, AgentRoster, ExecutionPlan, ExecutionTopology, Inputs, TaskHandle,
    UnknownToolWarning,
};
pub use engine::{CrewEvent, CrewOutput, ExecutionEngine, LlmCrewEngine, TaskOutput};
pub use orchestrator::DynamicCrew;
