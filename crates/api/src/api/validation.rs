// Input validation for the message API
//
// The request body is checked field by field so every problem is reported at
// once, each as an issue with a JSON path. Nothing downstream runs unless the
// body is valid.

use relay_core::ToolCallRequest;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use super::messages::IncomingMessage;

/// A single field-level validation problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValidationIssue {
    /// Machine-readable issue kind (e.g. "invalid_type", "too_small").
    #[schema(example = "too_small")]
    pub code: String,
    /// Location of the offending value, from the body root.
    pub path: Vec<String>,
    /// Human-readable description.
    pub message: String,
}

impl ValidationIssue {
    pub fn new(code: &str, path: &[&str], message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            path: path.iter().map(|s| s.to_string()).collect(),
            message: message.into(),
        }
    }

    fn required(path: &[&str]) -> Self {
        Self::new("invalid_type", path, "Required")
    }

    fn expected(path: &[&str], expected: &str, received: &Value) -> Self {
        Self::new(
            "invalid_type",
            path,
            format!("Expected {}, received {}", expected, type_name(received)),
        )
    }

    fn too_small(path: &[&str]) -> Self {
        Self::new(
            "too_small",
            path,
            "String must contain at least 1 character(s)",
        )
    }
}

/// Validation failure carrying every issue found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub Vec<ValidationIssue>);

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Parse and validate a raw `POST /message` body
pub fn parse_incoming_message(body: &[u8]) -> Result<IncomingMessage, ValidationError> {
    let value: Value = serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "Request body is not valid JSON");
        ValidationError(vec![ValidationIssue::new(
            "invalid_json",
            &[],
            format!("Malformed JSON in request body: {}", e),
        )])
    })?;

    validate_incoming_message(&value)
}

/// Validate an already-decoded JSON body
pub fn validate_incoming_message(value: &Value) -> Result<IncomingMessage, ValidationError> {
    let Some(object) = value.as_object() else {
        return Err(ValidationError(vec![ValidationIssue::expected(
            &[],
            "object",
            value,
        )]));
    };

    let mut issues = Vec::new();

    let user_message = required_string(object, "userMessage", &["userMessage"], &mut issues);

    let with_tool_call = match object.get("withToolCall") {
        None => None,
        Some(Value::Object(call)) => {
            let name = required_string(call, "name", &["withToolCall", "name"], &mut issues);
            let arguments = match call.get("arguments") {
                None => {
                    issues.push(ValidationIssue::required(&["withToolCall", "arguments"]));
                    None
                }
                Some(Value::String(s)) => Some(s.clone()),
                Some(other) => {
                    issues.push(ValidationIssue::expected(
                        &["withToolCall", "arguments"],
                        "string",
                        other,
                    ));
                    None
                }
            };
            match (name, arguments) {
                (Some(name), Some(arguments)) => Some(ToolCallRequest { name, arguments }),
                _ => None,
            }
        }
        Some(other) => {
            issues.push(ValidationIssue::expected(&["withToolCall"], "object", other));
            None
        }
    };

    match user_message {
        Some(user_message) if issues.is_empty() => Ok(IncomingMessage {
            user_message,
            with_tool_call,
        }),
        _ => {
            tracing::debug!(issues = issues.len(), "Request body failed validation");
            Err(ValidationError(issues))
        }
    }
}

/// Read a required, non-empty string field
fn required_string(
    object: &Map<String, Value>,
    key: &str,
    path: &[&str],
    issues: &mut Vec<ValidationIssue>,
) -> Option<String> {
    match object.get(key) {
        None => {
            issues.push(ValidationIssue::required(path));
            None
        }
        Some(Value::String(s)) if s.is_empty() => {
            issues.push(ValidationIssue::too_small(path));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            issues.push(ValidationIssue::expected(path, "string", other));
            None
        }
    }
}
