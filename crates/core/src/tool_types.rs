// Tool definitions and tool call requests
//
// ToolDefinition is the declaration sent to the LLM in the `tools` list of a
// Responses API request. ToolCallRequest is the caller's pre-selected tool call.

use serde::{Deserialize, Serialize};

/// Tool declaration offered to the LLM
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolDefinition {
    /// Function tool, executed by the relay
    Function(FunctionTool),
}

impl ToolDefinition {
    pub fn name(&self) -> &str {
        match self {
            ToolDefinition::Function(function) => &function.name,
        }
    }
}

/// Function tool declaration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionTool {
    /// Tool name (used by the LLM and for registry lookup)
    pub name: String,
    /// Tool description for the LLM
    pub description: String,
    /// JSON schema for tool parameters
    pub parameters: serde_json::Value,
    /// Whether the LLM must follow the schema exactly
    pub strict: bool,
}

/// Tool call selected by the caller
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ToolCallRequest {
    /// Tool name to execute
    #[cfg_attr(feature = "openapi", schema(example = "get_weather"))]
    pub name: String,
    /// Arguments as a JSON-encoded string
    #[cfg_attr(
        feature = "openapi",
        schema(example = "{\"latitude\":48.85,\"longitude\":2.35}")
    )]
    pub arguments: String,
}
