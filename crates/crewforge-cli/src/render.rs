use crewforge_core::{CrewEvent, ExecutionPlan};

/// One progress line for stderr, or `None` for events that print nothing.
pub fn format_event(event: &CrewEvent) -> Option<String> {
    match event {
        CrewEvent::TaskStarted { index, role } => Some(format!("\n[task {}: {role}]", index + 1)),
        CrewEvent::ToolStart { role, name } => Some(format!("[{role} -> tool: {name}]")),
        CrewEvent::ToolResult {
            name,
            success,
            summary,
            ..
        } => {
            let icon = if *success { "ok" } else { "err" };
            Some(format!("[{name}: {icon}] {summary}"))
        }
        CrewEvent::TaskFinished { index, role } => {
            Some(format!("[task {}: {role} done]", index + 1))
        }
        CrewEvent::ManagerStarted => Some("\n[manager: combining results]".to_string()),
        CrewEvent::Complete { .. } => None,
    }
}

/// Pretty JSON for `--plan-only`.
pub fn render_plan(plan: &ExecutionPlan) -> String {
    serde_json::to_string_pretty(&plan.summary()).unwrap_or_else(|_| plan.summary().to_string())
}
