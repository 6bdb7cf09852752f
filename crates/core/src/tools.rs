// Tool Abstraction
//
// Tools implement the `Tool` trait with a strongly-typed argument struct.
// The registry holds a closed set of built-in tools (`BuiltinTool`) and
// resolves them by exact name.
//
// Design decisions:
// - Dispatch is a match over BuiltinTool, so adding a tool is a compile-checked change
// - Arguments are decoded per tool; a decode failure is ToolArguments, never ToolNotFound
// - The registry is immutable once built and shared behind an Arc

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;

use crate::capabilities::{GetWeatherTool, SendEmailTool};
use crate::config::RelayConfig;
use crate::error::{RelayError, Result};
use crate::tool_types::{FunctionTool, ToolDefinition};

// ============================================================================
// Tool Trait
// ============================================================================

/// Trait for tools the relay can execute on the caller's behalf.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Decoded argument type
    type Args: DeserializeOwned + Send;

    /// Returns the tool's unique name.
    fn name(&self) -> &'static str;

    /// Returns a description of what the tool does.
    fn description(&self) -> &'static str;

    /// Returns the JSON schema for the tool's parameters.
    fn parameters_schema(&self) -> Value;

    /// Whether the LLM is asked to follow the schema strictly.
    fn strict(&self) -> bool {
        true
    }

    /// Execute the tool and return its string payload.
    async fn execute(&self, args: Self::Args) -> Result<String>;

    /// Decode raw JSON arguments into `Self::Args`.
    fn decode_arguments(&self, arguments: Value) -> Result<Self::Args> {
        serde_json::from_value(arguments)
            .map_err(|e| RelayError::arguments(self.name(), e.to_string()))
    }

    /// Convert this tool to the declaration sent to the LLM.
    fn to_definition(&self) -> ToolDefinition {
        ToolDefinition::Function(FunctionTool {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters_schema(),
            strict: self.strict(),
        })
    }
}

async fn decode_and_execute<T: Tool>(tool: &T, arguments: Value) -> Result<String> {
    let args = tool.decode_arguments(arguments)?;
    tool.execute(args).await
}

// ============================================================================
// BuiltinTool - closed set of tools
// ============================================================================

/// Every tool the relay knows how to run.
#[derive(Debug, Clone)]
pub enum BuiltinTool {
    GetWeather(GetWeatherTool),
    SendEmail(SendEmailTool),
}

impl BuiltinTool {
    pub fn name(&self) -> &'static str {
        match self {
            BuiltinTool::GetWeather(tool) => tool.name(),
            BuiltinTool::SendEmail(tool) => tool.name(),
        }
    }

    pub fn definition(&self) -> ToolDefinition {
        match self {
            BuiltinTool::GetWeather(tool) => tool.to_definition(),
            BuiltinTool::SendEmail(tool) => tool.to_definition(),
        }
    }

    /// Decode `arguments` into the tool's argument type and run it.
    pub async fn invoke(&self, arguments: Value) -> Result<String> {
        match self {
            BuiltinTool::GetWeather(tool) => decode_and_execute(tool, arguments).await,
            BuiltinTool::SendEmail(tool) => decode_and_execute(tool, arguments).await,
        }
    }
}

impl From<GetWeatherTool> for BuiltinTool {
    fn from(tool: GetWeatherTool) -> Self {
        BuiltinTool::GetWeather(tool)
    }
}

impl From<SendEmailTool> for BuiltinTool {
    fn from(tool: SendEmailTool) -> Self {
        BuiltinTool::SendEmail(tool)
    }
}

// ============================================================================
// ToolRegistry
// ============================================================================

/// Fixed, ordered collection of tools with O(1) lookup by name.
///
/// # Example
///
/// ```ignore
/// let registry = ToolRegistry::builder()
///     .tool(GetWeatherTool::new("https://api.open-meteo.com/v1/forecast"))
///     .tool(SendEmailTool::new(Duration::from_secs(2)))
///     .build();
///
/// let definitions = registry.definitions();
/// let tool = registry.find("get_weather");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<BuiltinTool>,
    index: HashMap<&'static str, usize>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the registry of built-in tools (`get_weather`, `send_email`)
    pub fn from_config(config: &RelayConfig) -> Self {
        ToolRegistry::builder()
            .tool(GetWeatherTool::new(config.weather_api_url.clone()))
            .tool(SendEmailTool::new(config.email_send_delay))
            .build()
    }

    pub fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder::new()
    }

    /// Register a tool. A tool with the same name is replaced in place.
    fn register(&mut self, tool: BuiltinTool) {
        match self.index.get(tool.name()) {
            Some(&position) => self.tools[position] = tool,
            None => {
                self.index.insert(tool.name(), self.tools.len());
                self.tools.push(tool);
            }
        }
    }

    /// Find a tool by exact name
    pub fn find(&self, name: &str) -> Option<&BuiltinTool> {
        self.index.get(name).map(|&position| &self.tools[position])
    }

    /// Tool declarations in registration order
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(BuiltinTool::definition).collect()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.tools.iter().map(BuiltinTool::name).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Builder for ToolRegistry with fluent API
#[derive(Default)]
pub struct ToolRegistryBuilder {
    registry: ToolRegistry,
}

impl ToolRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tool
    pub fn tool(mut self, tool: impl Into<BuiltinTool>) -> Self {
        self.registry.register(tool.into());
        self
    }

    pub fn build(self) -> ToolRegistry {
        self.registry
    }
}
