use anyhow::Result;
use crewforge_cli::{format_event, render_plan};
use crewforge_core::{CrewEvent, DynamicCrew, Inputs, Settings};
use tokio::sync::mpsc;
use tracing::info;

/// Design and bind the crew, print it, stop before execution.
pub async fn run_plan_only(settings: &Settings, goal: &str) -> Result<()> {
    let crew = DynamicCrew::from_settings(settings);
    let plan = crew.prepare(goal).await?;
    info!(
        agents = plan.agents.len(),
        tasks = plan.tasks.len(),
        warnings = plan.warnings.len(),
        "Plan-only run, skipping execution"
    );
    println!("{}", render_plan(&plan));
    Ok(())
}

/// Run the full pipeline, streaming progress to stderr and the final
/// deliverable to stdout.
pub async fn run(settings: &Settings, goal: &str, inputs: Inputs) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<CrewEvent>();
    let crew = DynamicCrew::from_settings_with_events(settings, event_tx);

    let crew_handle = tokio::spawn({
        let goal = goal.to_string();
        async move { crew.execute(&goal, inputs).await }
    });

    while let Some(event) = event_rx.recv().await {
        if let Some(line) = format_event(&event) {
            eprintln!("{line}");
        }
    }

    let output = crew_handle.await??;
    info!(tasks = output.tasks.len(), topology = %output.topology, "Crew finished");
    println!("\n{output}");
    Ok(())
}
