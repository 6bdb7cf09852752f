// OpenAI Responses API Driver
//
// Implementation of LlmDriver for the OpenAI Responses API
// (`POST {base_url}/responses`). Non-streaming.

use async_trait::async_trait;
use reqwest::Client;

use crate::config::{RelayConfig, DEFAULT_OPENAI_BASE_URL};
use crate::error::{RelayError, Result};
use crate::llm::{LlmDriver, ResponseBody, ResponseRequest};

/// OpenAI Responses API driver
///
/// # Example
///
/// ```ignore
/// use relay_core::openai::OpenAiResponsesDriver;
///
/// let driver = OpenAiResponsesDriver::new("your-api-key");
/// // or with custom endpoint
/// let driver = OpenAiResponsesDriver::with_base_url("your-api-key", "http://localhost:8080/v1");
/// ```
#[derive(Clone)]
pub struct OpenAiResponsesDriver {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiResponsesDriver {
    /// Create a new driver with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_OPENAI_BASE_URL)
    }

    /// Create a new driver with a custom base URL (for OpenAI-compatible APIs)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &RelayConfig) -> Self {
        Self::with_base_url(&config.openai_api_key, &config.openai_base_url)
    }

    fn responses_url(&self) -> String {
        format!("{}/responses", self.base_url)
    }
}

#[async_trait]
impl LlmDriver for OpenAiResponsesDriver {
    async fn create_response(&self, request: ResponseRequest) -> Result<ResponseBody> {
        let response = self
            .client
            .post(self.responses_url())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| RelayError::llm(format!("Failed to send request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(RelayError::llm(format!(
                "OpenAI API error ({}): {}",
                status, error_text
            )));
        }

        response
            .json::<ResponseBody>()
            .await
            .map_err(|e| RelayError::llm(format!("Failed to parse response: {}", e)))
    }
}

impl std::fmt::Debug for OpenAiResponsesDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiResponsesDriver")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}
