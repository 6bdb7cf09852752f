// Common DTOs for public API
//
// Every error body has a `message`; validation and internal errors add an
// `error` detail.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard error response for API endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error category ("Validation Error", "Internal Server Error", "Not Found").
    #[schema(example = "Validation Error")]
    pub message: String,
    /// Error detail: a list of field issues for validation errors,
    /// the error text for internal errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub error: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: None,
        }
    }

    pub fn with_error(mut self, error: serde_json::Value) -> Self {
        self.error = Some(error);
        self
    }

    /// Convert to axum response tuple
    pub fn into_response(self, status: StatusCode) -> (StatusCode, Json<Self>) {
        (status, Json(self))
    }
}

/// Fallback for unmatched routes and methods
pub async fn handle_not_found() -> Response {
    ErrorResponse::new("Not Found")
        .into_response(StatusCode::NOT_FOUND)
        .into_response()
}
