use crate::config::Settings;
use crate::constants::{endpoints, env, limits, tools};
use crate::error::CrewError;
use crate::tools::traits::{Tool, ToolResult};
use serde::Deserialize;

/// Semantic web search through the Exa API, returning result highlights.
pub struct ExaSearchTool {
    client: reqwest::Client,
    api_key: Option<String>,
    api_key_env: String,
    base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExaResult {
    #[serde(default)]
    pub title: Option<String>,
    pub url: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ExaResponse {
    #[serde(default)]
    results: Vec<ExaResult>,
}

impl ExaSearchTool {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_key_env: env::EXA_API_KEY.to_string(),
            base_url: endpoints::EXA_BASE_URL.to_string(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.search_api_key())
            .with_api_key_env(settings.search.api_key_env.clone())
            .with_base_url(settings.search.base_url.clone())
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_api_key_env(mut self, var: impl Into<String>) -> Self {
        self.api_key_env = var.into();
        self
    }
}

/// Render results as numbered source blocks, at most five of them.
pub fn format_results(results: &[ExaResult]) -> String {
    results
        .iter()
        .take(limits::EXA_NUM_RESULTS)
        .enumerate()
        .map(|(idx, result)| {
            format!(
                "[SOURCE {}]\nTitle: {}\nURL: {}\nHighlights:\n{}\n\n",
                idx + 1,
                result.title.as_deref().unwrap_or_default(),
                result.url,
                result.highlights.concat()
            )
        })
        .collect()
}

#[async_trait::async_trait]
impl Tool for ExaSearchTool {
    fn name(&self) -> &str {
        tools::EXA_SEARCH
    }

    fn description(&self) -> &str {
        "Search the web semantically with Exa and return the most relevant passages of the top results, with their titles and URLs."
    }

    async fn invoke(&self, query: &str) -> ToolResult {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| CrewError::missing_credential(tools::EXA_SEARCH, &self.api_key_env))?;

        let url = format!("{}/search", self.base_url.trim_end_matches('/'));
        let body = serde_json::json!({
            "query": query,
            "type": "neural",
            "useAutoprompt": true,
            "numResults": limits::EXA_NUM_RESULTS,
            "contents": { "highlights": true },
        });

        let response = self
            .client
            .post(&url)
            .header("x-api-key", api_key)
            .timeout(std::time::Duration::from_secs(limits::HTTP_TIMEOUT_SECS))
            .json(&body)
            .send()
            .await
            .map_err(|e| CrewError::tool(tools::EXA_SEARCH, format!("Search request failed: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| CrewError::tool(tools::EXA_SEARCH, format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(CrewError::tool(
                tools::EXA_SEARCH,
                format!("Exa API error ({}): {}", status, text),
            ));
        }

        let parsed: ExaResponse = serde_json::from_str(&text)
            .map_err(|e| CrewError::tool(tools::EXA_SEARCH, format!("Malformed response: {e}")))?;

        tracing::debug!("Exa returned {} results for '{}'", parsed.results.len(), query);
        Ok(format_results(&parsed.results))
    }
}
