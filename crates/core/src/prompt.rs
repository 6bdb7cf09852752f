// Prompt model
//
// A request sends exactly one prompt. Without a tool call it is the user's
// message verbatim; with a tool call it is a system prompt that folds the
// user's message and the tool result together.

use serde::{Deserialize, Serialize};

/// One input item of a Responses API request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Prompt {
    User { content: String },
    System { content: String },
}

impl Prompt {
    pub fn user(content: impl Into<String>) -> Self {
        Prompt::User {
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Prompt::System {
            content: content.into(),
        }
    }

    /// Build the system prompt that embeds a tool result
    pub fn with_tool_result(user_message: &str, tool_result: &str) -> Self {
        Prompt::system(format!(
            "{SYSTEM_PREAMBLE}\n\n<user-request>\n{user_message}\n</user-request>\n\n<system-data>\n{tool_result}\n</system-data>\n"
        ))
    }

    pub fn content(&self) -> &str {
        match self {
            Prompt::User { content } | Prompt::System { content } => content,
        }
    }

    pub fn is_user(&self) -> bool {
        matches!(self, Prompt::User { .. })
    }

    pub fn role(&self) -> &'static str {
        match self {
            Prompt::User { .. } => "user",
            Prompt::System { .. } => "system",
        }
    }
}

const SYSTEM_PREAMBLE: &str = "You are a helpful assistant that answers requests based on the user's request and the system data.

If the user's request is not related to the system data or you don't have the information to answer the question, try the best to answer with your own knowledge, if you don't have the information, say some apologetic message.

Please use markdown to format your response.";
