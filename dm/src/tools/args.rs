//! Argument validation shared by the built-in tools

use serde_json::Value;
use tracing::debug;

use super::ToolError;

/// Extract a required, non-empty string parameter from a tool's input object
pub fn required_str<'a>(input: &'a Value, key: &str) -> Result<&'a str, ToolError> {
    debug!(%key, "required_str: called");
    if !(input.is_object() || input.is_null()) {
        return Err(ToolError::InvalidArgument("arguments must be an object".to_string()));
    }

    match input.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s),
        Some(Value::String(_)) => Err(ToolError::InvalidArgument(format!("{} must not be empty", key))),
        Some(Value::Null) | None => Err(ToolError::InvalidArgument(format!(
            "Missing required parameter: {}",
            key
        ))),
        Some(other) => Err(ToolError::InvalidArgument(format!(
            "{} must be a string, got {}",
            key,
            json_type(other)
        ))),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
