use crate::constants::{limits, tools};
use crate::error::CrewError;
use crate::tools::traits::{Tool, ToolResult};
use regex::Regex;
use std::sync::LazyLock;

static SCRIPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b.*?</script\s*>").expect("valid regex"));
static STYLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style\b.*?</style\s*>").expect("valid regex"));
static BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</?(p|div|br|li|ul|ol|h[1-6]|tr|td|section|article|header|footer|pre|blockquote)\b[^>]*>")
        .expect("valid regex")
});
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));
static SPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t\r\f\x{a0}]+").expect("valid regex"));

/// Fetches a web page named in the query and returns the passages that
/// mention the remaining query terms.
pub struct WebsiteSearchTool {
    client: reqwest::Client,
}

impl Default for WebsiteSearchTool {
    fn default() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl Tool for WebsiteSearchTool {
    fn name(&self) -> &str {
        tools::WEBSITE_SEARCH
    }

    fn description(&self) -> &str {
        "Search the content of a specific website. The query must contain the page URL followed by the terms to look for, e.g. 'https://example.com pricing plans'."
    }

    async fn invoke(&self, query: &str) -> ToolResult {
        let (url, terms) = split_query(query).ok_or_else(|| {
            CrewError::tool(tools::WEBSITE_SEARCH, "Query must contain an http(s) URL")
        })?;

        let response = self
            .client
            .get(url)
            .timeout(std::time::Duration::from_secs(limits::HTTP_TIMEOUT_SECS))
            .header("User-Agent", "crewforge/0.1")
            .send()
            .await
            .map_err(|e| CrewError::tool(tools::WEBSITE_SEARCH, format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CrewError::tool(
                tools::WEBSITE_SEARCH,
                format!("Fetching {} returned {}", url, status),
            ));
        }

        let html = response
            .text()
            .await
            .map_err(|e| CrewError::tool(tools::WEBSITE_SEARCH, format!("Failed to read page: {e}")))?;

        let paragraphs = extract_paragraphs(&html);
        let passages = select_passages(&paragraphs, &terms);
        if passages.is_empty() {
            return Ok(format!("No content matching the query was found on {url}"));
        }
        Ok(truncate_chars(&passages.join("\n\n"), limits::WEBSITE_MAX_CHARS))
    }
}

/// Split a query into its URL and the lowercase search terms around it.
fn split_query(query: &str) -> Option<(&str, Vec<String>)> {
    let url = query
        .split_whitespace()
        .find(|w| w.starts_with("http://") || w.starts_with("https://"))?;
    let terms = query
        .split_whitespace()
        .filter(|w| *w != url)
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|w| w.len() > 2)
        .collect();
    Some((url, terms))
}

fn extract_paragraphs(html: &str) -> Vec<String> {
    let text = SCRIPT_RE.replace_all(html, " ");
    let text = STYLE_RE.replace_all(&text, " ");
    let text = BLOCK_RE.replace_all(&text, "\n");
    let text = TAG_RE.replace_all(&text, "");
    let text = html_escape::decode_html_entities(&text);

    text.lines()
        .map(|line| SPACE_RE.replace_all(line, " ").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

fn select_passages<'a>(paragraphs: &'a [String], terms: &[String]) -> Vec<&'a str> {
    paragraphs
        .iter()
        .filter(|p| {
            if terms.is_empty() {
                return true;
            }
            let lower = p.to_lowercase();
            terms.iter().any(|t| lower.contains(t.as_str()))
        })
        .map(String::as_str)
        .collect()
}

fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
