use crate::constants::limits;
use crate::crew::{AgentHandle, AgentRoster, ExecutionTopology, Inputs, TaskHandle};
use crate::engine::{interpolate, ExecutionEngine};
use crate::error::CrewError;
use crate::llm::{LlmClient, Message, ToolCall};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

/// Progress events emitted while a crew runs.
#[derive(Debug, Clone)]
pub enum CrewEvent {
    TaskStarted { index: usize, role: String },
    ToolStart { role: String, name: String },
    ToolResult { role: String, name: String, success: bool, summary: String },
    TaskFinished { index: usize, role: String },
    ManagerStarted,
    Complete { tasks: usize },
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskOutput {
    pub agent_role: String,
    pub description: String,
    pub output: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CrewOutput {
    pub final_output: String,
    pub tasks: Vec<TaskOutput>,
    pub topology: ExecutionTopology,
}

impl fmt::Display for CrewOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.final_output)
    }
}

/// Built-in engine: every agent is a chat session with the shared model,
/// calling its tools until it produces a final answer.
pub struct LlmCrewEngine {
    llm: Arc<dyn LlmClient>,
    max_iterations: usize,
    event_tx: Option<UnboundedSender<CrewEvent>>,
}

impl LlmCrewEngine {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            llm,
            max_iterations: limits::AGENT_MAX_ITERATIONS,
            event_tx: None,
        }
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_events(mut self, tx: UnboundedSender<CrewEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    fn emit(&self, event: CrewEvent) {
        if let Some(ref tx) = self.event_tx {
            let _ = tx.send(event);
        }
    }

    /// Run one task through its agent, feeding in earlier task results.
    async fn run_task(
        &self,
        task: &TaskHandle,
        context: &[TaskOutput],
        inputs: &Inputs,
    ) -> Result<String, CrewError> {
        let agent = task.agent();
        let mut messages = vec![
            Message::system(agent_prompt(agent, inputs)),
            Message::user(task_prompt(task, context, inputs)),
        ];
        let tool_definitions = agent.tool_definitions();

        for iteration in 1..=self.max_iterations {
            debug!(role = %agent.role, iteration, "Agent turn");
            let reply = self.llm.chat(&messages, &tool_definitions).await?;
            if !reply.requests_tools() {
                return Ok(reply.content);
            }

            let tool_calls = reply.tool_calls.clone();
            messages.push(reply);
            for call in &tool_calls {
                self.emit(CrewEvent::ToolStart {
                    role: agent.role.clone(),
                    name: call.name.clone(),
                });

                let (success, result) = execute_tool(agent, call).await;
                let summary = if success {
                    truncate_str(&result, limits::TOOL_SUMMARY_CHARS)
                } else {
                    result.clone()
                };
                self.emit(CrewEvent::ToolResult {
                    role: agent.role.clone(),
                    name: call.name.clone(),
                    success,
                    summary,
                });

                messages.push(Message::tool_result(&call.id, result));
            }
        }

        Err(CrewError::MaxIterations(self.max_iterations))
    }

    /// Hierarchical runs end with a manager pass over every task result.
    async fn run_manager(&self, outputs: &[TaskOutput]) -> Result<String, CrewError> {
        self.emit(CrewEvent::ManagerStarted);

        let mut user_msg = String::from("## Crew Results\n");
        for (i, out) in outputs.iter().enumerate() {
            user_msg.push_str(&format!(
                "### Task {} ({})\n{}\n\n#### Result\n{}\n\n",
                i + 1,
                out.agent_role,
                out.description,
                out.output
            ));
        }
        user_msg.push_str("Produce the final deliverable for the crew.");

        self.llm.generate(MANAGER_PROMPT, &user_msg).await
    }
}

#[async_trait::async_trait]
impl ExecutionEngine for LlmCrewEngine {
    type Output = CrewOutput;

    async fn run(
        &self,
        agents: AgentRoster,
        tasks: Vec<TaskHandle>,
        topology: ExecutionTopology,
        inputs: Inputs,
    ) -> Result<CrewOutput, CrewError> {
        info!(agents = agents.len(), tasks = tasks.len(), %topology, "Starting crew");

        let mut outputs: Vec<TaskOutput> = Vec::with_capacity(tasks.len());
        for (index, task) in tasks.iter().enumerate() {
            let role = task.agent_role().to_string();
            self.emit(CrewEvent::TaskStarted {
                index,
                role: role.clone(),
            });

            let output = self.run_task(task, &outputs, &inputs).await?;

            self.emit(CrewEvent::TaskFinished {
                index,
                role: role.clone(),
            });
            outputs.push(TaskOutput {
                agent_role: role,
                description: interpolate(&task.description, &inputs),
                output,
            });
        }

        let final_output = match topology {
            ExecutionTopology::Hierarchical => self.run_manager(&outputs).await?,
            ExecutionTopology::Sequential => outputs
                .last()
                .map(|o| o.output.clone())
                .unwrap_or_default(),
        };

        self.emit(CrewEvent::Complete {
            tasks: outputs.len(),
        });

        Ok(CrewOutput {
            final_output,
            tasks: outputs,
            topology,
        })
    }
}

async fn execute_tool(agent: &AgentHandle, call: &ToolCall) -> (bool, String) {
    let Some(tool) = agent.tool(&call.name) else {
        return (false, format!("Tool '{}' is not available to {}", call.name, agent.role));
    };

    let query = match call.query() {
        Ok(q) => q,
        Err(e) => return (false, e),
    };

    match tool.invoke(&query).await {
        Ok(result) => (true, result),
        Err(e) => (false, format!("Error: {e}")),
    }
}

fn agent_prompt(agent: &AgentHandle, inputs: &Inputs) -> String {
    format!(
        "You are {}. {}\nYour personal goal is: {}",
        agent.role,
        interpolate(&agent.backstory, inputs),
        interpolate(&agent.goal, inputs)
    )
}

fn task_prompt(task: &TaskHandle, context: &[TaskOutput], inputs: &Inputs) -> String {
    let mut msg = format!(
        "## Current Task\n{}\n\n## Expected Output\n{}\n",
        interpolate(&task.description, inputs),
        interpolate(&task.expected_output, inputs)
    );
    if !context.is_empty() {
        msg.push_str("\n## Context From Previous Tasks\n");
        for out in context {
            msg.push_str(&format!("### {}\n{}\n\n", out.agent_role, out.output));
        }
    }
    msg.push_str("\nUse your tools if they help, then give your complete final answer.");
    msg
}

fn truncate_str(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

const MANAGER_PROMPT: &str = r#"You are the MANAGER of an AI agent crew.
Your crew members have each completed their assigned tasks.

You will receive:
- Every task description, in execution order
- The result each crew member produced

Your job:
1. Check the results against their task descriptions
2. Resolve contradictions between crew members
3. Combine the results into one coherent final deliverable

Output only the final deliverable."#;
