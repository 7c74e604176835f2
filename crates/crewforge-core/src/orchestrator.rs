//! Goal in, crew result out.
//!
//! [`DynamicCrew`] sequences the pipeline: ask the model for a team design,
//! bind agents against the tool registry, bind tasks against the agents,
//! pick a topology and hand the result to an [`ExecutionEngine`]. Binding
//! errors abort the run before the engine is called.

use crate::config::Settings;
use crate::crew::{bind_plan, ExecutionPlan, Inputs};
use crate::engine::{CrewEvent, ExecutionEngine, LlmCrewEngine};
use crate::error::CrewError;
use crate::llm::LlmClient;
use crate::plan::PlanExtractor;
use crate::tools::ToolRegistry;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, info_span, Instrument};

pub struct DynamicCrew<E: ExecutionEngine> {
    extractor: PlanExtractor,
    registry: ToolRegistry,
    engine: E,
}

impl<E: ExecutionEngine> DynamicCrew<E> {
    pub fn new(llm: Arc<dyn LlmClient>, registry: ToolRegistry, engine: E) -> Self {
        Self {
            extractor: PlanExtractor::new(llm),
            registry,
            engine,
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Everything up to, but not including, execution.
    pub async fn prepare(&self, goal: &str) -> Result<ExecutionPlan, CrewError> {
        let (plan, source) = self.extractor.extract_with_source(goal).await?;
        info!(?source, agents = plan.agents.len(), tasks = plan.tasks.len(), "Team design ready");

        let execution_plan = bind_plan(&plan, &self.registry)?;
        info!(
            roles = ?execution_plan.agents.roles(),
            topology = %execution_plan.topology,
            warnings = execution_plan.warnings.len(),
            "Crew bound"
        );
        Ok(execution_plan)
    }

    /// Design, bind and run a crew for `goal`.
    pub async fn execute(&self, goal: &str, inputs: Inputs) -> Result<E::Output, CrewError> {
        let run_id = uuid::Uuid::new_v4();
        async move {
            let plan = self.prepare(goal).await?;
            self.engine
                .run(plan.agents, plan.tasks, plan.topology, inputs)
                .await
        }
        .instrument(info_span!("crew_run", %run_id))
        .await
    }
}

impl DynamicCrew<LlmCrewEngine> {
    /// Production wiring: OpenAI-compatible model, built-in tools and engine.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::build(settings, None)
    }

    pub fn from_settings_with_events(settings: &Settings, tx: UnboundedSender<CrewEvent>) -> Self {
        Self::build(settings, Some(tx))
    }

    fn build(settings: &Settings, tx: Option<UnboundedSender<CrewEvent>>) -> Self {
        settings.check_credentials();

        let llm = settings.build_llm_client();
        let registry = ToolRegistry::with_defaults(settings);
        let mut engine =
            LlmCrewEngine::new(Arc::clone(&llm)).with_max_iterations(settings.engine.max_iterations);
        if let Some(tx) = tx {
            engine = engine.with_events(tx);
        }
        Self::new(llm, registry, engine)
    }
}
