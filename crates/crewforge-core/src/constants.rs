/// crewforge: centralized constants.
/// Model defaults, endpoints, tool names and limits live here.

// ─── Models ───────────────────────────────────────────────────────────────────

pub mod models {
    pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";
    /// Team design is asked for deterministically.
    pub const PLANNER_TEMPERATURE: f32 = 0.0;
}

// ─── API Endpoints ────────────────────────────────────────────────────────────

pub mod endpoints {
    pub const OPENAI_BASE_URL: &str = "https://api.openai.com";
    pub const EXA_BASE_URL: &str = "https://api.exa.ai";
}

// ─── Credentials ──────────────────────────────────────────────────────────────

pub mod env {
    pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
    pub const EXA_API_KEY: &str = "EXA_API_KEY";
}

// ─── Tools ────────────────────────────────────────────────────────────────────

pub mod tools {
    pub const EXA_SEARCH: &str = "ExaSearchTool";
    pub const WEBSITE_SEARCH: &str = "WebsiteSearchTool";
    pub const FILE_READ: &str = "FileReadTool";

    /// Tool names the planner is allowed to hand out.
    pub const BUILTIN: &[&str] = &[EXA_SEARCH, WEBSITE_SEARCH, FILE_READ];
}

// ─── Limits ───────────────────────────────────────────────────────────────────

pub mod limits {
    pub const EXA_NUM_RESULTS: usize = 5;
    pub const FILE_READ_MAX_BYTES: usize = 50_000;
    pub const WEBSITE_MAX_CHARS: usize = 8_000;
    pub const HTTP_TIMEOUT_SECS: u64 = 30;
    pub const AGENT_MAX_ITERATIONS: usize = 10;
    pub const TOOL_SUMMARY_CHARS: usize = 200;
}

// ─── Process ──────────────────────────────────────────────────────────────────

pub mod process {
    pub const SEQUENTIAL: &str = "sequential";
    pub const HIERARCHICAL: &str = "hierarchical";
}
