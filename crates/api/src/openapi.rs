// OpenAPI specification generation
//
// This module defines the OpenAPI spec for the relay API.
// It is served by the API server and printed by the export-openapi binary.

use crate::api;
use relay_core::ToolCallRequest;
use utoipa::OpenApi;

/// OpenAPI documentation for the relay API
#[derive(OpenApi)]
#[openapi(
    paths(api::messages::post_message),
    components(schemas(
        api::messages::IncomingMessage,
        api::messages::OutputItem,
        api::common::ErrorResponse,
        api::validation::ValidationIssue,
        ToolCallRequest,
    )),
    tags(
        (name = "messages", description = "Relay a chat message to the LLM, optionally with one tool call")
    ),
    info(
        title = "Tool-Call Relay API",
        version = "0.1.0",
        description = "Forwards chat messages to the OpenAI Responses API, optionally augmented with a tool result",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Pretty-printed JSON document
    pub fn to_json() -> String {
        ApiDoc::openapi()
            .to_pretty_json()
            .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_message_route() {
        let doc: serde_json::Value = serde_json::from_str(&ApiDoc::to_json()).unwrap();
        assert!(doc["paths"]["/message"]["post"].is_object());
        assert!(doc["components"]["schemas"]["IncomingMessage"].is_object());
        assert!(doc["components"]["schemas"]["OutputItem"].is_object());
    }
}
