// LLM Client Types
//
// `LlmDriver` is the transport seam: it sends one Responses API request and
// returns the decoded body. `LlmClient` wraps a driver with the fixed model
// and the rule that tools are only offered alongside a user prompt.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::error::{RelayError, Result};
use crate::prompt::Prompt;
use crate::tool_types::ToolDefinition;

// ============================================================================
// Request / Response
// ============================================================================

/// Body of a Responses API request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseRequest {
    pub model: String,
    pub input: Vec<Prompt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDefinition>>,
}

impl ResponseRequest {
    /// Build a single-prompt request. Tools are attached only to user prompts,
    /// so a prompt that already carries a tool result cannot trigger another call.
    pub fn new(model: impl Into<String>, prompt: Prompt, tools: &[ToolDefinition]) -> Self {
        let tools = if prompt.is_user() {
            Some(tools.to_vec())
        } else {
            None
        };

        Self {
            model: model.into(),
            input: vec![prompt],
            tools,
        }
    }

    pub fn prompt(&self) -> Option<&Prompt> {
        self.input.first()
    }
}

/// Decoded Responses API body. Only `output` is interpreted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseBody {
    #[serde(default)]
    pub output: Vec<Value>,
}

impl ResponseBody {
    pub fn into_first_output(self) -> Result<Value> {
        self.output
            .into_iter()
            .next()
            .ok_or(RelayError::EmptyCompletion)
    }
}

// ============================================================================
// LlmDriver Trait
// ============================================================================

/// Trait for LLM transports
///
/// Implementations handle provider-specific API calls and response decoding.
#[async_trait]
pub trait LlmDriver: Send + Sync {
    async fn create_response(&self, request: ResponseRequest) -> Result<ResponseBody>;
}

pub type BoxedLlmDriver = Arc<dyn LlmDriver>;

// ============================================================================
// LlmClient
// ============================================================================

/// Client bound to one model, constructed once at startup
#[derive(Clone)]
pub struct LlmClient {
    driver: BoxedLlmDriver,
    model: String,
}

impl LlmClient {
    pub fn new(driver: BoxedLlmDriver, model: impl Into<String>) -> Self {
        Self {
            driver,
            model: model.into(),
        }
    }

    /// Submit one prompt and return the first output item.
    ///
    /// Only the first item is surfaced even when the model returns several.
    pub async fn complete(&self, prompt: Prompt, tools: &[ToolDefinition]) -> Result<Value> {
        let request = ResponseRequest::new(self.model.clone(), prompt, tools);
        tracing::debug!(
            model = %self.model,
            role = request.prompt().map(Prompt::role).unwrap_or_default(),
            tools = request.tools.as_ref().map(Vec::len).unwrap_or(0),
            "Requesting completion"
        );

        let body = self.driver.create_response(request).await?;
        if body.output.len() > 1 {
            tracing::debug!(
                items = body.output.len(),
                "Discarding output items after the first"
            );
        }
        body.into_first_output()
    }
}

impl std::fmt::Debug for LlmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmClient")
            .field("model", &self.model)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool_types::FunctionTool;
    use serde_json::json;
    use std::sync::Mutex;

    struct RecordingDriver {
        requests: Mutex<Vec<ResponseRequest>>,
        output: Vec<Value>,
    }

    #[async_trait]
    impl LlmDriver for RecordingDriver {
        async fn create_response(&self, request: ResponseRequest) -> Result<ResponseBody> {
            self.requests.lock().unwrap().push(request);
            Ok(ResponseBody {
                output: self.output.clone(),
            })
        }
    }

    fn tools() -> Vec<ToolDefinition> {
        vec![ToolDefinition::Function(FunctionTool {
            name: "get_weather".to_string(),
            description: "Weather".to_string(),
            parameters: json!({"type": "object"}),
            strict: true,
        })]
    }

    #[test]
    fn test_user_prompt_carries_tools() {
        let request = ResponseRequest::new("gpt-4o-mini", Prompt::user("hi"), &tools());
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gpt-4o-mini");
        assert_eq!(value["input"], json!([{"role": "user", "content": "hi"}]));
        assert_eq!(value["tools"][0]["name"], "get_weather");
    }

    #[test]
    fn test_system_prompt_omits_tools() {
        let request = ResponseRequest::new("gpt-4o-mini", Prompt::system("data"), &tools());
        assert!(request.tools.is_none());
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("tools").is_none());
    }

    #[tokio::test]
    async fn test_complete_returns_first_output() {
        let driver = Arc::new(RecordingDriver {
            requests: Mutex::new(Vec::new()),
            output: vec![json!({"type": "message", "id": 1}), json!({"type": "message", "id": 2})],
        });
        let client = LlmClient::new(driver.clone(), "gpt-4o-mini");

        let item = client.complete(Prompt::user("hi"), &tools()).await.unwrap();
        assert_eq!(item, json!({"type": "message", "id": 1}));

        let requests = driver.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model, "gpt-4o-mini");
    }

    #[tokio::test]
    async fn test_complete_with_empty_output_fails() {
        let driver = Arc::new(RecordingDriver {
            requests: Mutex::new(Vec::new()),
            output: Vec::new(),
        });
        let client = LlmClient::new(driver, "gpt-4o-mini");

        let err = client.complete(Prompt::user("hi"), &[]).await.unwrap_err();
        assert!(matches!(err, RelayError::EmptyCompletion));
    }
}
