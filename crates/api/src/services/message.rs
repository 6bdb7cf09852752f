// Message service for business logic
//
// Owns the request lifecycle after validation:
// - Without a tool call: user prompt plus every tool declaration
// - With a tool call: run the tool, fold its result into a system prompt, no tools
// - One LLM call, first output item returned

use relay_core::{
    BoxedLlmDriver, LlmClient, Prompt, RelayConfig, RelayError, Result, ToolCallRequest,
    ToolDefinition, ToolFailurePolicy, ToolRegistry, UnknownToolPolicy,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::messages::IncomingMessage;

pub struct MessageService {
    registry: Arc<ToolRegistry>,
    definitions: Vec<ToolDefinition>,
    llm: LlmClient,
    unknown_tool_policy: UnknownToolPolicy,
    tool_failure_policy: ToolFailurePolicy,
}

impl MessageService {
    pub fn new(registry: Arc<ToolRegistry>, llm: LlmClient) -> Self {
        let definitions = registry.definitions();
        Self {
            registry,
            definitions,
            llm,
            unknown_tool_policy: UnknownToolPolicy::default(),
            tool_failure_policy: ToolFailurePolicy::default(),
        }
    }

    /// Build the service with the built-in tools and the configured policies
    pub fn from_config(config: &RelayConfig, driver: BoxedLlmDriver) -> Self {
        let registry = Arc::new(ToolRegistry::from_config(config));
        let llm = LlmClient::new(driver, config.model.clone());
        Self::new(registry, llm)
            .with_unknown_tool_policy(config.unknown_tool_policy)
            .with_tool_failure_policy(config.tool_failure_policy)
    }

    pub fn with_unknown_tool_policy(mut self, policy: UnknownToolPolicy) -> Self {
        self.unknown_tool_policy = policy;
        self
    }

    pub fn with_tool_failure_policy(mut self, policy: ToolFailurePolicy) -> Self {
        self.tool_failure_policy = policy;
        self
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Relay a validated message and return the LLM's first output item
    pub async fn relay(&self, message: IncomingMessage) -> Result<Value> {
        let prompt = match &message.with_tool_call {
            None => Prompt::user(message.user_message),
            Some(call) => {
                let tool_result = self.run_tool_call(call).await?;
                Prompt::with_tool_result(&message.user_message, &tool_result)
            }
        };

        self.llm.complete(prompt, &self.definitions).await
    }

    /// Execute the caller's tool call and return its string result
    async fn run_tool_call(&self, call: &ToolCallRequest) -> Result<String> {
        // Arguments must be JSON even when the tool turns out to be unknown
        let arguments: Value = serde_json::from_str(&call.arguments)
            .map_err(|e| RelayError::arguments(&call.name, e.to_string()))?;

        let result = match self.registry.find(&call.name) {
            Some(tool) => match tool.invoke(arguments).await {
                Ok(result) => result,
                Err(err) if err.is_client_error() => return Err(err),
                Err(err) => match self.tool_failure_policy {
                    ToolFailurePolicy::Propagate => return Err(err),
                    ToolFailurePolicy::EmptyResult => {
                        warn!(tool = %call.name, error = %err, "Tool failed, continuing with empty result");
                        String::new()
                    }
                },
            },
            None => match self.unknown_tool_policy {
                UnknownToolPolicy::EmptyResult => {
                    warn!(tool = %call.name, "Unknown tool, continuing with empty result");
                    String::new()
                }
                UnknownToolPolicy::Reject => {
                    return Err(RelayError::ToolNotFound(call.name.clone()))
                }
            },
        };

        info!(tool = %call.name, result = %result, "Tool call completed");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use relay_core::{LlmDriver, ResponseBody, ResponseRequest, SendEmailTool};
    use serde_json::json;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingDriver {
        requests: Mutex<Vec<ResponseRequest>>,
    }

    #[async_trait]
    impl LlmDriver for RecordingDriver {
        async fn create_response(&self, request: ResponseRequest) -> Result<ResponseBody> {
            self.requests.lock().unwrap().push(request);
            Ok(ResponseBody {
                output: vec![json!({"type": "message", "content": "ok"})],
            })
        }
    }

    fn service(driver: Arc<RecordingDriver>) -> MessageService {
        let registry = ToolRegistry::builder()
            .tool(SendEmailTool::new(Duration::ZERO))
            .build();
        MessageService::new(Arc::new(registry), LlmClient::new(driver, "gpt-4o-mini"))
    }

    #[tokio::test]
    async fn test_plain_message_sends_user_prompt_with_tools() {
        let driver = Arc::new(RecordingDriver::default());
        let service = service(driver.clone());

        let item = service.relay(IncomingMessage::new("Hello")).await.unwrap();
        assert_eq!(item["content"], "ok");

        let requests = driver.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].input, vec![Prompt::user("Hello")]);
        let tools = requests[0].tools.as_ref().unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name(), "send_email");
    }

    #[tokio::test]
    async fn test_tool_call_result_is_folded_into_system_prompt() {
        let driver = Arc::new(RecordingDriver::default());
        let service = service(driver.clone());

        let message = IncomingMessage::new("Email Bob").with_tool_call(
            "send_email",
            r#"{"to":"bob@example.com","subject":"Hi","body":"Lunch?"}"#,
        );
        service.relay(message).await.unwrap();

        let requests = driver.requests.lock().unwrap();
        let prompt = &requests[0].input[0];
        assert_eq!(prompt.role(), "system");
        assert!(prompt.content().contains("<user-request>\nEmail Bob\n</user-request>"));
        assert!(prompt.content().contains(r#""to": "bob@example.com""#));
        assert!(requests[0].tools.is_none());
    }

    #[tokio::test]
    async fn test_unknown_tool_uses_empty_result() {
        let driver = Arc::new(RecordingDriver::default());
        let service = service(driver.clone());

        let message = IncomingMessage::new("Hi").with_tool_call("teleport", "{}");
        service.relay(message).await.unwrap();

        let requests = driver.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].input[0]
            .content()
            .contains("<system-data>\n\n</system-data>"));
        assert!(requests[0].tools.is_none());
    }

    #[tokio::test]
    async fn test_unknown_tool_rejected_when_configured() {
        let driver = Arc::new(RecordingDriver::default());
        let service = service(driver.clone()).with_unknown_tool_policy(UnknownToolPolicy::Reject);

        let message = IncomingMessage::new("Hi").with_tool_call("teleport", "{}");
        let err = service.relay(message).await.unwrap_err();

        assert!(matches!(err, RelayError::ToolNotFound(name) if name == "teleport"));
        assert!(driver.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_arguments_fail_before_llm_call() {
        let driver = Arc::new(RecordingDriver::default());
        let service = service(driver.clone());

        for name in ["send_email", "teleport"] {
            let message = IncomingMessage::new("Hi").with_tool_call(name, "{not json");
            let err = service.relay(message).await.unwrap_err();
            assert!(matches!(err, RelayError::ToolArguments { .. }));
        }
        assert!(driver.requests.lock().unwrap().is_empty());
    }
}
