// Error types for the relay

use thiserror::Error;

/// Result type alias for relay operations
pub type Result<T> = std::result::Result<T, RelayError>;

/// Errors that can occur while handling a relayed message
#[derive(Debug, Error)]
pub enum RelayError {
    /// Tool name did not match any registered tool (only raised when
    /// unknown tools are rejected)
    #[error("Unknown tool: {0}")]
    ToolNotFound(String),

    /// Tool arguments could not be decoded into the tool's argument type
    #[error("Invalid arguments for tool {tool}: {message}")]
    ToolArguments { tool: String, message: String },

    /// Tool handler failed
    #[error("Tool execution error: {0}")]
    ToolExecution(String),

    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// LLM returned no output items
    #[error("LLM returned an empty output list")]
    EmptyCompletion,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl RelayError {
    /// Create a tool argument error
    pub fn arguments(tool: impl Into<String>, message: impl Into<String>) -> Self {
        RelayError::ToolArguments {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Create a tool execution error
    pub fn tool(msg: impl Into<String>) -> Self {
        RelayError::ToolExecution(msg.into())
    }

    /// Create an LLM error
    pub fn llm(msg: impl Into<String>) -> Self {
        RelayError::Llm(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        RelayError::Configuration(msg.into())
    }

    /// True for errors caused by the caller's request rather than by the relay
    /// or its upstreams.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            RelayError::ToolNotFound(_) | RelayError::ToolArguments { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(RelayError::ToolNotFound("nope".into()).is_client_error());
        assert!(RelayError::arguments("get_weather", "expected value").is_client_error());
        assert!(!RelayError::tool("boom").is_client_error());
        assert!(!RelayError::llm("timeout").is_client_error());
        assert!(!RelayError::EmptyCompletion.is_client_error());
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            RelayError::arguments("send_email", "missing field `to`").to_string(),
            "Invalid arguments for tool send_email: missing field `to`"
        );
        assert_eq!(RelayError::llm("down").to_string(), "LLM error: down");
    }
}
