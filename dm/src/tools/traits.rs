//! Tool trait definition

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::{ServerLabels, ToolContext, ToolError};

/// A named operation callers can invoke with a JSON argument object
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (matches the `name` in a `tools/call` request)
    fn name(&self) -> &'static str;

    /// Human-readable description, phrased with the server's subject label
    fn description(&self, labels: &ServerLabels) -> String;

    /// JSON Schema for input parameters
    fn input_schema(&self) -> Value;

    /// Validate `input` and run the tool
    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<ToolResult, ToolError>;
}

/// Successful output of a tool execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResult {
    pub content: String,
}

impl ToolResult {
    /// Create a text result
    pub fn text(content: impl Into<String>) -> Self {
        debug!("ToolResult::text: called");
        Self {
            content: content.into(),
        }
    }
}

/// Tool metadata advertised to callers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}
