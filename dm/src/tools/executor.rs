//! ToolExecutor - registry and dispatch for the server's tools

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

use super::builtin::{GetDocTool, ListDocsTool, SearchDocsTool};
use super::{ServerLabels, Tool, ToolContext, ToolDefinition, ToolError, ToolResult};

/// Tools keyed by name; iteration is name-ordered so listings are stable
pub struct ToolExecutor {
    tools: BTreeMap<String, Box<dyn Tool>>,
}

impl ToolExecutor {
    /// Create executor with the three documentation tools
    pub fn standard() -> Self {
        debug!("ToolExecutor::standard: called");
        let mut executor = Self::empty();
        executor.add_tool(Box::new(ListDocsTool));
        executor.add_tool(Box::new(GetDocTool));
        executor.add_tool(Box::new(SearchDocsTool));
        executor
    }

    /// Create an empty executor (for testing)
    pub fn empty() -> Self {
        debug!("ToolExecutor::empty: called");
        Self { tools: BTreeMap::new() }
    }

    /// Add a tool to the executor, replacing any tool with the same name
    pub fn add_tool(&mut self, tool: Box<dyn Tool>) {
        debug!(tool_name = %tool.name(), "ToolExecutor::add_tool: called");
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Get tool definitions, sorted by name
    pub fn definitions(&self, labels: &ServerLabels) -> Vec<ToolDefinition> {
        debug!("ToolExecutor::definitions: called");
        self.tools
            .values()
            .map(|t| ToolDefinition {
                name: t.name().to_string(),
                description: t.description(labels),
                input_schema: t.input_schema(),
            })
            .collect()
    }

    /// Execute a tool by name
    pub async fn execute(&self, name: &str, input: Value, ctx: &ToolContext) -> Result<ToolResult, ToolError> {
        debug!(tool_name = %name, "ToolExecutor::execute: called");
        match self.tools.get(name) {
            Some(tool) => {
                debug!("ToolExecutor::execute: tool found, executing");
                tool.execute(input, ctx).await
            }
            None => {
                debug!("ToolExecutor::execute: unknown tool");
                Err(ToolError::UnknownTool { name: name.to_string() })
            }
        }
    }

    /// Check if a tool exists
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get tool names, sorted
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }
}

impl Default for ToolExecutor {
    fn default() -> Self {
        Self::standard()
    }
}
