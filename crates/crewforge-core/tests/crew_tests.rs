use crewforge_core::crew::{bind_agents, bind_tasks, sanitize_description};
use crewforge_core::{
    bind_plan, fallback, AgentSpec, CrewError, ExecutionTopology, PlanDocument, TaskSpec, Tool,
    ToolRegistry, ToolResult,
};
use std::sync::Arc;

/// Tool that just echoes its query, registered under a chosen name.
struct NamedEcho(&'static str);

#[async_trait::async_trait]
impl Tool for NamedEcho {
    fn name(&self) -> &str {
        self.0
    }

    fn description(&self) -> &str {
        "Echoes the query"
    }

    async fn invoke(&self, query: &str) -> ToolResult {
        Ok(format!("{}: {}", self.0, query))
    }
}

fn registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(NamedEcho("ExaSearchTool")));
    registry.register(Arc::new(NamedEcho("FileReadTool")));
    registry
}

fn agent(role: &str, tools: &[&str]) -> AgentSpec {
    AgentSpec {
        role: role.to_string(),
        goal: format!("{role} goal"),
        backstory: format!("{role} backstory"),
        tools: tools.iter().map(|t| t.to_string()).collect(),
    }
}

fn task(description: &str, role: &str) -> TaskSpec {
    TaskSpec {
        description: description.to_string(),
        expected_output: "output".to_string(),
        agent_role: role.to_string(),
    }
}

// ============================================================================
// Agent binding
// ============================================================================

#[test]
fn test_bind_agents_resolves_tools() {
    let bound = bind_agents(
        &[agent("Researcher", &["ExaSearchTool", "FileReadTool"]), agent("Writer", &[])],
        &registry(),
    )
    .unwrap();

    assert!(bound.warnings.is_empty());
    assert_eq!(bound.agents.roles(), vec!["Researcher", "Writer"]);

    let researcher = bound.agents.get("Researcher").unwrap();
    assert_eq!(researcher.goal, "Researcher goal");
    assert_eq!(researcher.backstory, "Researcher backstory");
    assert_eq!(researcher.tool_names(), vec!["ExaSearchTool", "FileReadTool"]);
    assert!(bound.agents.get("Writer").unwrap().tools().is_empty());
}

#[test]
fn test_tool_instances_are_shared_with_registry() {
    let registry = registry();
    let bound = bind_agents(
        &[agent("A", &["ExaSearchTool"]), agent("B", &["ExaSearchTool"])],
        &registry,
    )
    .unwrap();

    let a = &bound.agents.get("A").unwrap().tools()[0];
    let b = &bound.agents.get("B").unwrap().tools()[0];
    assert!(Arc::ptr_eq(a, b));
    assert!(Arc::ptr_eq(a, &registry.resolve("ExaSearchTool").unwrap()));
}

#[test]
fn test_unknown_tool_is_a_warning_not_an_error() {
    let registry = registry();
    assert!(registry.resolve("NoSuchTool").is_none());

    let bound = bind_agents(
        &[agent("Researcher", &["NoSuchTool", "ExaSearchTool"])],
        &registry,
    )
    .unwrap();

    let researcher = bound.agents.get("Researcher").unwrap();
    assert_eq!(researcher.tool_names(), vec!["ExaSearchTool"]);
    assert_eq!(bound.warnings.len(), 1);
    assert_eq!(bound.warnings[0].role, "Researcher");
    assert_eq!(bound.warnings[0].tool, "NoSuchTool");
    assert!(bound.warnings[0].to_string().contains("NoSuchTool"));
}

#[test]
fn test_duplicate_role_is_rejected() {
    let err = bind_agents(
        &[agent("Researcher", &[]), agent("Writer", &[]), agent("Researcher", &["ExaSearchTool"])],
        &registry(),
    )
    .unwrap_err();

    match err {
        CrewError::DuplicateRole(role) => assert_eq!(role, "Researcher"),
        other => panic!("expected DuplicateRole, got {other:?}"),
    }
}

// ============================================================================
// Task binding
// ============================================================================

#[test]
fn test_bind_tasks_preserves_order_and_agent() {
    let bound = bind_agents(&[agent("Researcher", &[]), agent("Writer", &[])], &registry()).unwrap();
    let tasks = bind_tasks(
        &[
            task("first", "Writer"),
            task("second", "Researcher"),
            task("third", "Writer"),
        ],
        &bound.agents,
    )
    .unwrap();

    let descriptions: Vec<&str> = tasks.iter().map(|t| t.description.as_str()).collect();
    assert_eq!(descriptions, vec!["first", "second", "third"]);
    let roles: Vec<&str> = tasks.iter().map(|t| t.agent_role()).collect();
    assert_eq!(roles, vec!["Writer", "Researcher", "Writer"]);
    assert!(Arc::ptr_eq(tasks[0].agent(), bound.agents.get("Writer").unwrap()));
}

#[test]
fn test_unknown_agent_role_is_rejected() {
    let bound = bind_agents(&[agent("Researcher", &[]), agent("Writer", &[])], &registry()).unwrap();
    let err = bind_tasks(
        &[task("research", "Researcher"), task("edit", "Editor")],
        &bound.agents,
    )
    .unwrap_err();

    match err {
        CrewError::UnknownAgentRole { role, task_index } => {
            assert_eq!(role, "Editor");
            assert_eq!(task_index, 1);
        }
        other => panic!("expected UnknownAgentRole, got {other:?}"),
    }
}

#[test]
fn test_task_descriptions_are_sanitized() {
    let bound = bind_agents(&[agent("Writer", &[])], &registry()).unwrap();
    let tasks = bind_tasks(&[task("Summarize {topic} findings", "Writer")], &bound.agents).unwrap();
    assert_eq!(tasks[0].description, "Summarize  findings");
    assert_eq!(tasks[0].expected_output, "output");
}

#[test]
fn test_sanitize_examples() {
    assert_eq!(sanitize_description("Summarize {topic} findings"), "Summarize  findings");
    assert_eq!(sanitize_description("{a}{b} c {d e f}"), " c ");
    assert_eq!(sanitize_description("no placeholders"), "no placeholders");
    assert_eq!(sanitize_description("open { only"), "open { only");
    assert_eq!(sanitize_description("close } only"), "close } only");
    assert_eq!(sanitize_description("nested {a {b} c}"), "nested  c}");
}

#[test]
fn test_sanitize_is_idempotent() {
    let inputs = [
        "Summarize {topic} findings",
        "nested {a {b} c} tail }",
        "{{double}}",
        "} reversed {",
        "{ unclosed",
        "plain text",
    ];
    for input in inputs {
        let once = sanitize_description(input);
        assert_eq!(sanitize_description(&once), once, "input: {input:?}");
    }
}

// ============================================================================
// Topology
// ============================================================================

#[test]
fn test_select_hierarchical_case_insensitive() {
    for p in ["Hierarchical", "HIERARCHICAL", "hierarchical"] {
        assert_eq!(ExecutionTopology::select(Some(p)), ExecutionTopology::Hierarchical);
    }
}

#[test]
fn test_select_defaults_to_sequential() {
    for p in ["", "foo", "sequential", " hierarchical", "hierarchical-ish"] {
        assert_eq!(ExecutionTopology::select(Some(p)), ExecutionTopology::Sequential);
    }
    assert_eq!(ExecutionTopology::select(None), ExecutionTopology::Sequential);
}

// ============================================================================
// Whole-plan binding
// ============================================================================

#[test]
fn test_bind_plan_fallback() {
    let plan = bind_plan(&fallback("tidal energy"), &registry()).unwrap();
    assert_eq!(plan.topology, ExecutionTopology::Sequential);
    assert_eq!(plan.agents.len(), 2);
    assert_eq!(plan.tasks.len(), 2);
    assert!(plan.warnings.is_empty());

    let summary = plan.summary();
    assert_eq!(summary["topology"], "sequential");
    assert_eq!(summary["agents"][0]["tools"][0], "ExaSearchTool");
    assert_eq!(summary["tasks"][1]["agent_role"], "Writer");
}

#[test]
fn test_bind_plan_hierarchical_with_warnings() {
    let doc = PlanDocument {
        agents: vec![agent("Lead", &["WebsiteSearchTool"]), agent("Analyst", &["FileReadTool"])],
        tasks: vec![task("analyze", "Analyst"), task("decide", "Lead")],
        process: "Hierarchical".to_string(),
    };
    let plan = bind_plan(&doc, &registry()).unwrap();
    assert_eq!(plan.topology, ExecutionTopology::Hierarchical);
    assert_eq!(plan.warnings.len(), 1);
    assert_eq!(plan.warnings[0].tool, "WebsiteSearchTool");
}
