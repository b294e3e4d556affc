//! list_docs tool - enumerate every document with a short preview

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use crate::tools::{ServerLabels, Tool, ToolContext, ToolError, ToolResult};

/// List all documents in store order
pub struct ListDocsTool;

#[async_trait]
impl Tool for ListDocsTool {
    fn name(&self) -> &'static str {
        "list_docs"
    }

    fn description(&self, labels: &ServerLabels) -> String {
        format!(
            "List all available {} files with a short preview of each.",
            labels.documentation_phrase()
        )
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<ToolResult, ToolError> {
        debug!(?input, "ListDocsTool::execute: called");
        Ok(ToolResult::text(ctx.engine.list_documents()))
    }
}
