// Message HTTP route and API contracts
//
// POST /message relays one user message to the LLM. With `withToolCall` the
// named tool runs first and its result is folded into a system prompt.

use axum::{body::Bytes, extract::State, routing::post, Json, Router};
use relay_core::ToolCallRequest;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use super::common::{handle_not_found, ErrorResponse};
use super::error::ApiError;
use super::validation::parse_incoming_message;
use crate::services::MessageService;

// ============================================
// Message API Contracts
// ============================================

/// Request body for POST /message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IncomingMessage {
    /// The user's chat message (non-empty).
    #[schema(example = "What's the weather in Paris?")]
    pub user_message: String,
    /// Optional tool to run before calling the LLM.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_tool_call: Option<ToolCallRequest>,
}

impl IncomingMessage {
    pub fn new(user_message: impl Into<String>) -> Self {
        Self {
            user_message: user_message.into(),
            with_tool_call: None,
        }
    }

    pub fn with_tool_call(mut self, name: impl Into<String>, arguments: impl Into<String>) -> Self {
        self.with_tool_call = Some(ToolCallRequest {
            name: name.into(),
            arguments: arguments.into(),
        });
        self
    }
}

/// First output item of the LLM response, passed through unchanged.
/// Either a message object or a function-call object.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct OutputItem(pub serde_json::Value);

// ============================================
// App State and Routes
// ============================================

/// App state for message routes
#[derive(Clone)]
pub struct AppState {
    pub message_service: Arc<MessageService>,
}

impl AppState {
    pub fn new(message_service: MessageService) -> Self {
        Self {
            message_service: Arc::new(message_service),
        }
    }
}

/// Create message routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/message", post(post_message).fallback(handle_not_found))
        .with_state(state)
}

// ============================================
// HTTP Handlers
// ============================================

/// POST /message - Relay a user message to the LLM
#[utoipa::path(
    post,
    path = "/message",
    request_body = IncomingMessage,
    responses(
        (status = 200, description = "First output item of the LLM response", body = OutputItem),
        (status = 400, description = "Request body failed validation", body = ErrorResponse),
        (status = 500, description = "Tool or LLM failure", body = ErrorResponse)
    ),
    tag = "messages"
)]
pub async fn post_message(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<OutputItem>, ApiError> {
    let message = parse_incoming_message(&body)?;
    let item = state.message_service.relay(message).await?;
    Ok(Json(OutputItem(item)))
}

// ============================================
// Tests
// ============================================
