// Error translation for HTTP handlers
// Decision: Caller mistakes are 400 "Validation Error" with itemized issues
// Decision: Everything else collapses to 500 with the error's message text

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use relay_core::RelayError;
use thiserror::Error;

use super::common::ErrorResponse;
use super::validation::{ValidationError, ValidationIssue};

pub const VALIDATION_ERROR_MESSAGE: &str = "Validation Error";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Error returned by API handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed validation")]
    Validation(Vec<ValidationIssue>),

    #[error(transparent)]
    Relay(#[from] RelayError),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err.0)
    }
}

/// Map a caller-caused relay error onto the request field it came from
fn issue_for(err: &RelayError) -> Option<ValidationIssue> {
    match err {
        RelayError::ToolNotFound(name) => Some(ValidationIssue::new(
            "unknown_tool",
            &["withToolCall", "name"],
            format!("No tool named '{}'", name),
        )),
        RelayError::ToolArguments { message, .. } => Some(ValidationIssue::new(
            "invalid_arguments",
            &["withToolCall", "arguments"],
            message.clone(),
        )),
        _ => None,
    }
}

fn validation_response(issues: Vec<ValidationIssue>) -> Response {
    let detail = serde_json::to_value(issues).unwrap_or_default();
    ErrorResponse::new(VALIDATION_ERROR_MESSAGE)
        .with_error(detail)
        .into_response(StatusCode::BAD_REQUEST)
        .into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(issues) => validation_response(issues),
            ApiError::Relay(err) => match issue_for(&err) {
                Some(issue) => {
                    tracing::debug!(error = %err, "Rejected tool call");
                    validation_response(vec![issue])
                }
                None => {
                    tracing::error!(error = %err, "Failed to relay message");
                    ErrorResponse::new(INTERNAL_ERROR_MESSAGE)
                        .with_error(serde_json::Value::String(err.to_string()))
                        .into_response(StatusCode::INTERNAL_SERVER_ERROR)
                        .into_response()
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};

    async fn render(err: ApiError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_validation_error_body() {
        let (status, body) = render(ApiError::Validation(vec![ValidationIssue::new(
            "too_small",
            &["userMessage"],
            "String must contain at least 1 character(s)",
        )]))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Validation Error");
        assert_eq!(body["error"][0]["path"], json!(["userMessage"]));
    }

    #[tokio::test]
    async fn test_argument_error_is_validation_error() {
        let (status, body) =
            render(RelayError::arguments("get_weather", "expected value at line 1").into()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Validation Error");
        assert_eq!(body["error"][0]["code"], "invalid_arguments");
        assert_eq!(body["error"][0]["path"], json!(["withToolCall", "arguments"]));
    }

    #[tokio::test]
    async fn test_unknown_tool_is_validation_error() {
        let (status, body) = render(RelayError::ToolNotFound("teleport".into()).into()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"][0]["code"], "unknown_tool");
    }

    #[tokio::test]
    async fn test_other_errors_are_internal() {
        for err in [
            RelayError::llm("OpenAI API error (500): boom"),
            RelayError::tool("Weather request failed"),
            RelayError::EmptyCompletion,
        ] {
            let text = err.to_string();
            let (status, body) = render(err.into()).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(
                body,
                json!({"message": "Internal Server Error", "error": text})
            );
        }
    }
}
