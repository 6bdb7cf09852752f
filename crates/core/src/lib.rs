// Tool-Call Relay Core
//
// Building blocks for relaying a chat message to the OpenAI Responses API,
// optionally folding in the result of one caller-selected tool call.
//
// Key design decisions:
// - Tools are a closed enum (BuiltinTool) with per-tool typed arguments
// - ToolRegistry resolves tools by exact name and is immutable once built
// - LlmDriver is the transport seam; LlmClient adds the model and the tools rule
// - Configuration is read once at startup via RelayConfig::from_env

pub mod capabilities;
pub mod config;
pub mod error;
pub mod llm;
pub mod openai;
pub mod prompt;
pub mod tool_types;
pub mod tools;

// Re-exports for convenience
pub use config::{RelayConfig, ToolFailurePolicy, UnknownToolPolicy};
pub use error::{RelayError, Result};
pub use llm::{BoxedLlmDriver, LlmClient, LlmDriver, ResponseBody, ResponseRequest};
pub use openai::OpenAiResponsesDriver;
pub use prompt::Prompt;
pub use tool_types::{FunctionTool, ToolCallRequest, ToolDefinition};
pub use tools::{BuiltinTool, Tool, ToolRegistry, ToolRegistryBuilder};

pub use capabilities::{GetWeatherArgs, GetWeatherTool, SendEmailArgs, SendEmailTool};
