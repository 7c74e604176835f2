use crate::constants::{limits, tools};
use crate::error::CrewError;
use crate::tools::traits::{Tool, ToolResult};

/// Reads a local text file; the query is the path.
pub struct FileReadTool;

#[async_trait::async_trait]
impl Tool for FileReadTool {
    fn name(&self) -> &str {
        tools::FILE_READ
    }

    fn description(&self) -> &str {
        "Read the contents of a local file. The query is the absolute or relative path of the file to read."
    }

    async fn invoke(&self, query: &str) -> ToolResult {
        let path = query.trim().trim_matches(|c| c == '"' || c == '\'');
        if path.is_empty() {
            return Err(CrewError::tool(tools::FILE_READ, "Missing file path"));
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| CrewError::tool(tools::FILE_READ, format!("Failed to read '{}': {}", path, e)))?;

        let truncated = bytes.len() > limits::FILE_READ_MAX_BYTES;
        let body = if truncated {
            &bytes[..limits::FILE_READ_MAX_BYTES]
        } else {
            &bytes[..]
        };

        let mut content = String::from_utf8_lossy(body).into_owned();
        if truncated {
            content.push_str(&format!(
                "\n... [truncated, {} of {} bytes shown]",
                limits::FILE_READ_MAX_BYTES,
                bytes.len()
            ));
        }
        Ok(content)
    }
}
