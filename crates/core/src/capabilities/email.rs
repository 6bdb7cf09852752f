//! send_email - stubbed email delivery
//!
//! Nothing is sent. After a fixed delay the tool reports success together with
//! the payload it was given, so the LLM can confirm the email to the user.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::error::{RelayError, Result};
use crate::tools::Tool;

const SENT_NOTE: &str = "The email is sent successfully using the email tool.";

/// Arguments for `send_email`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SendEmailArgs {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EmailReceipt<'a> {
    #[serde(rename = "noteForLLM")]
    note_for_llm: &'static str,
    email_payload: &'a SendEmailArgs,
}

#[derive(Debug, Clone)]
pub struct SendEmailTool {
    delay: Duration,
}

impl SendEmailTool {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl Tool for SendEmailTool {
    type Args = SendEmailArgs;

    fn name(&self) -> &'static str {
        "send_email"
    }

    fn description(&self) -> &'static str {
        "Send an email to a given recipient with a subject and message."
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "to": {
                    "type": "string",
                    "description": "The recipient email address."
                },
                "subject": {
                    "type": "string",
                    "description": "Email subject line."
                },
                "body": {
                    "type": "string",
                    "description": "Body of the email message."
                }
            },
            "required": ["to", "subject", "body"],
            "additionalProperties": false
        })
    }

    async fn execute(&self, args: SendEmailArgs) -> Result<String> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let receipt = EmailReceipt {
            note_for_llm: SENT_NOTE,
            email_payload: &args,
        };
        serde_json::to_string_pretty(&receipt).map_err(|e| RelayError::Internal(e.into()))
    }
}
