//! get_doc tool - fetch one document by exact path

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use crate::tools::{ServerLabels, Tool, ToolContext, ToolError, ToolResult, required_str};

/// Return the full content of one document
pub struct GetDocTool;

#[async_trait]
impl Tool for GetDocTool {
    fn name(&self) -> &'static str {
        "get_doc"
    }

    fn description(&self, labels: &ServerLabels) -> String {
        format!(
            "Get the full content of a {} file by its path, exactly as shown by list_docs.",
            labels.documentation_phrase()
        )
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "description": "Path of the document, as listed by list_docs"
                }
            },
            "required": ["name"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<ToolResult, ToolError> {
        debug!(?input, "GetDocTool::execute: called");
        let name = required_str(&input, "name")?;

        let content = ctx.engine.get_document(name)?;
        debug!(%name, bytes = content.len(), "GetDocTool::execute: found document");
        Ok(ToolResult::text(content))
    }
}
