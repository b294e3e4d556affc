//! search_docs tool - fuzzy search across ids and content

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use crate::tools::{ServerLabels, Tool, ToolContext, ToolError, ToolResult, required_str};

/// Fuzzy-search every document and return highlighted previews
pub struct SearchDocsTool;

#[async_trait]
impl Tool for SearchDocsTool {
    fn name(&self) -> &'static str {
        "search_docs"
    }

    fn description(&self, labels: &ServerLabels) -> String {
        format!(
            "Search across all {} for a word or phrase. Tolerates small typos; \
            returns matching files ranked best first with the matched text in [brackets].",
            labels.documentation_phrase()
        )
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Text to search for (case and accent insensitive)"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<ToolResult, ToolError> {
        debug!(?input, "SearchDocsTool::execute: called");
        let query = required_str(&input, "query")?;

        let text = ctx.engine.search_documents(query)?;
        Ok(ToolResult::text(text))
    }
}
