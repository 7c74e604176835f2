mod crew;
mod interpolate;

pub use crew::{CrewEvent, CrewOutput, LlmCrewEngine, TaskOutput};
pub use interpolate::interpolate;

use crate::crew::{AgentRoster, ExecutionTopology, Inputs, TaskHandle};
use crate::error::CrewError;

/// Runs a bound crew. The pipeline hands over the plan and never inspects
/// the output.
#[async_trait::async_trait]
pub trait ExecutionEngine: Send + Sync {
    type Output: Send;

    async fn run(
        &self,
        agents: AgentRoster,
        tasks: Vec<TaskHandle>,
        topology: ExecutionTopology,
        inputs: Inputs,
    ) -> Result<Self::Output, CrewError>;
}
