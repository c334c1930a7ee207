//! Small convenience constructors for common types.

use crate::{ApiToolSpec, SessionId, ToolCall, ToolError, ToolExecutionContext};

/// Parses tool definitions exported from the tool store as a JSON array.
pub fn parse_tool_specs(json: &str) -> Result<Vec<ApiToolSpec>, ToolError> {
    serde_json::from_str(json)
        .map_err(|err| ToolError::invalid_config(format!("Invalid tool definitions: {err}")))
}

pub fn tool_call(
    id: impl Into<String>,
    name: impl Into<String>,
    arguments: impl Into<String>,
) -> ToolCall {
    ToolCall::new(id, name, arguments)
}

pub fn execution_context(session_id: impl Into<SessionId>) -> ToolExecutionContext {
    ToolExecutionContext::new(session_id)
}
