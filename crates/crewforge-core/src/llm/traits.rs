use crate::error::CrewError;
use crate::tools::ToolDefinition;
use serde_json::Value;

/// Who a chat message is from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Assistant,
    /// Output of a tool call, answering the assistant message that requested it.
    Tool,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Tool => "tool",
        }
    }
}

/// One turn of an agent conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
    /// Tools the assistant asked to run; empty for a final answer.
    pub tool_calls: Vec<ToolCall>,
    /// Set on [`Role::Tool`] messages.
    pub tool_call_id: Option<String>,
}

impl Message {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Assistant turn that requests tool runs instead of answering.
    pub fn tool_request(content: impl Into<String>, calls: Vec<ToolCall>) -> Self {
        Self {
            tool_calls: calls,
            ..Self::new(Role::Assistant, content)
        }
    }

    pub fn tool_result(call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool_call_id: Some(call_id.into()),
            ..Self::new(Role::Tool, content)
        }
    }

    pub fn requests_tools(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// A tool invocation requested by the model. `arguments` is the raw JSON
/// object text the model produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: String,
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments: arguments.into(),
        }
    }

    /// The `query` argument every crew tool takes.
    pub fn query(&self) -> Result<String, String> {
        let args: Value = serde_json::from_str(&self.arguments)
            .map_err(|e| format!("Failed to parse tool arguments: {e}"))?;
        args.get("query")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| "Missing required parameter: query".to_string())
    }
}

/// The chat-completion capability used by the planner and the built-in engine.
#[async_trait::async_trait]
pub trait LlmClient: Send + Sync {
    /// Send the conversation and get the assistant's next message.
    async fn chat(&self, messages: &[Message], tools: &[ToolDefinition])
        -> Result<Message, CrewError>;

    /// Single-shot text generation: one system instruction, one user message.
    async fn generate(&self, system: &str, user: &str) -> Result<String, CrewError> {
        let messages = [Message::system(system), Message::user(user)];
        Ok(self.chat(&messages, &[]).await?.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_argument() {
        let call = ToolCall::new("c1", "ExaSearchTool", r#"{"query": "tides"}"#);
        assert_eq!(call.query().unwrap(), "tides");
    }

    #[test]
    fn test_query_errors() {
        let missing = ToolCall::new("c1", "ExaSearchTool", r#"{"q": "tides"}"#);
        assert!(missing.query().unwrap_err().contains("query"));

        let broken = ToolCall::new("c1", "ExaSearchTool", "{not json");
        assert!(broken.query().unwrap_err().contains("parse"));
    }

    #[test]
    fn test_tool_result_has_tool_role() {
        let msg = Message::tool_result("c1", "out");
        assert_eq!(msg.role, Role::Tool);
        assert_eq!(msg.tool_call_id.as_deref(), Some("c1"));
        assert!(!msg.requests_tools());
        assert!(Message::tool_request("", vec![ToolCall::new("c1", "t", "{}")]).requests_tools());
    }
}
