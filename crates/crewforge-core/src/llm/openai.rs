use crate::constants::{endpoints, env, models};
use crate::error::CrewError;
use crate::llm::traits::*;
use crate::tools::ToolDefinition;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Client for OpenAI-compatible `/v1/chat/completions` endpoints.
pub struct OpenAIClient {
    client: reqwest::Client,
    api_key: Option<String>,
    api_key_env: String,
    model: String,
    base_url: String,
    temperature: f32,
}

impl OpenAIClient {
    /// A missing key is accepted here; `chat` reports it when first used.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_key_env: env::OPENAI_API_KEY.to_string(),
            model: models::DEFAULT_OPENAI_MODEL.to_string(),
            base_url: endpoints::OPENAI_BASE_URL.to_string(),
            temperature: models::PLANNER_TEMPERATURE,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Name of the variable the key came from, used in error messages.
    pub fn with_api_key_env(mut self, var: impl Into<String>) -> Self {
        self.api_key_env = var.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_tool_defs(&self, tools: &[ToolDefinition]) -> Vec<Value> {
        tools
            .iter()
            .map(|t| {
                serde_json::json!({
                    "type": "function",
                    "function": {
                        "name": t.name,
                        "description": t.description,
                        "parameters": t.parameters,
                    }
                })
            })
            .collect()
    }

    fn build_messages(&self, messages: &[Message]) -> Vec<Value> {
        messages
            .iter()
            .map(|m| match m.role {
                Role::Tool => serde_json::json!({
                    "role": "tool",
                    "tool_call_id": m.tool_call_id,
                    "content": m.content,
                }),
                Role::Assistant if m.requests_tools() => {
                    let calls: Vec<Value> = m
                        .tool_calls
                        .iter()
                        .map(|tc| {
                            serde_json::json!({
                                "id": tc.id,
                                "type": "function",
                                "function": {
                                    "name": tc.name,
                                    "arguments": tc.arguments,
                                }
                            })
                        })
                        .collect();
                    serde_json::json!({
                        "role": "assistant",
                        "content": m.content,
                        "tool_calls": calls,
                    })
                }
                _ => serde_json::json!({
                    "role": m.role.as_str(),
                    "content": m.content,
                }),
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIMessage {
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<OpenAIToolCall>>,
}

#[derive(Debug, Deserialize)]
struct OpenAIToolCall {
    id: String,
    function: OpenAIFunction,
}

#[derive(Debug, Deserialize)]
struct OpenAIFunction {
    name: String,
    arguments: String,
}

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<Value>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Value>>,
}

#[async_trait::async_trait]
impl LlmClient for OpenAIClient {
    async fn chat(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
    ) -> Result<Message, CrewError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| CrewError::missing_credential("language model", &self.api_key_env))?;

        let url = format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'));

        let request_body = OpenAIRequest {
            model: self.model.clone(),
            messages: self.build_messages(messages),
            temperature: self.temperature,
            tools: if tools.is_empty() {
                None
            } else {
                Some(self.build_tool_defs(tools))
            },
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            return Err(CrewError::Llm(format!(
                "OpenAI API error ({}): {}",
                status, response_text
            )));
        }

        parse_response(&response_text)
    }
}

/// Convert a chat-completions body into the assistant's message.
fn parse_response(body: &str) -> Result<Message, CrewError> {
    let api_response: OpenAIResponse = serde_json::from_str(body)
        .map_err(|e| CrewError::Llm(format!("Failed to parse response: {e}")))?;

    let choice = api_response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| CrewError::Llm("No response from API".into()))?;

    let calls = choice
        .message
        .tool_calls
        .unwrap_or_default()
        .into_iter()
        .map(|tc| ToolCall::new(tc.id, tc.function.name, tc.function.arguments))
        .collect();

    Ok(Message::tool_request(
        choice.message.content.unwrap_or_default(),
        calls,
    ))
}
