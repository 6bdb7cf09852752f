// Relay configuration loaded from environment variables.
// Decision: OPENAI_API_KEY is the only required setting; a missing key aborts startup
// Decision: Fallback behaviour for unknown tools and failing tools is explicit config, not implied

use std::net::SocketAddr;
use std::time::Duration;

use crate::error::{RelayError, Result};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_WEATHER_API_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_EMAIL_SEND_DELAY: Duration = Duration::from_millis(2000);
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// What to do when `withToolCall.name` matches no registered tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownToolPolicy {
    /// Continue with an empty tool result
    #[default]
    EmptyResult,
    /// Reject the request as invalid
    Reject,
}

impl UnknownToolPolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "empty" | "empty_result" => Some(UnknownToolPolicy::EmptyResult),
            "reject" => Some(UnknownToolPolicy::Reject),
            _ => None,
        }
    }
}

/// What to do when a tool handler fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolFailurePolicy {
    /// Surface the failure to the caller
    #[default]
    Propagate,
    /// Log the failure and continue with an empty tool result
    EmptyResult,
}

impl ToolFailurePolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "propagate" => Some(ToolFailurePolicy::Propagate),
            "empty" | "empty_result" => Some(ToolFailurePolicy::EmptyResult),
            _ => None,
        }
    }
}

/// Process-wide relay configuration
#[derive(Clone)]
pub struct RelayConfig {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub model: String,
    pub weather_api_url: String,
    pub email_send_delay: Duration,
    pub unknown_tool_policy: UnknownToolPolicy,
    pub tool_failure_policy: ToolFailurePolicy,
    pub bind_addr: SocketAddr,
}

impl RelayConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let openai_api_key = get("OPENAI_API_KEY")
            .ok_or_else(|| RelayError::config("OPENAI_API_KEY environment variable not set"))?;

        let openai_base_url = get("OPENAI_BASE_URL")
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string());

        let model = get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let weather_api_url =
            get("WEATHER_API_URL").unwrap_or_else(|| DEFAULT_WEATHER_API_URL.to_string());

        let email_send_delay = match get("EMAIL_SEND_DELAY_MS") {
            Some(raw) => raw.trim().parse().map(Duration::from_millis).map_err(|_| {
                RelayError::config(format!("EMAIL_SEND_DELAY_MS is not a number: {}", raw))
            })?,
            None => DEFAULT_EMAIL_SEND_DELAY,
        };

        let unknown_tool_policy = match get("UNKNOWN_TOOL_POLICY") {
            Some(raw) => UnknownToolPolicy::parse(&raw).ok_or_else(|| {
                RelayError::config(format!(
                    "UNKNOWN_TOOL_POLICY must be 'empty' or 'reject', got '{}'",
                    raw
                ))
            })?,
            None => UnknownToolPolicy::default(),
        };

        let tool_failure_policy = match get("TOOL_FAILURE_POLICY") {
            Some(raw) => ToolFailurePolicy::parse(&raw).ok_or_else(|| {
                RelayError::config(format!(
                    "TOOL_FAILURE_POLICY must be 'propagate' or 'empty', got '{}'",
                    raw
                ))
            })?,
            None => ToolFailurePolicy::default(),
        };

        let bind_raw = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse()
            .map_err(|_| RelayError::config(format!("BIND_ADDR is not a socket address: {}", bind_raw)))?;

        Ok(Self {
            openai_api_key,
            openai_base_url,
            model,
            weather_api_url,
            email_send_delay,
            unknown_tool_policy,
            tool_failure_policy,
            bind_addr,
        })
    }
}

impl std::fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayConfig")
            .field("openai_api_key", &"[REDACTED]")
            .field("openai_base_url", &self.openai_base_url)
            .field("model", &self.model)
            .field("weather_api_url", &self.weather_api_url)
            .field("email_send_delay", &self.email_send_delay)
            .field("unknown_tool_policy", &self.unknown_tool_policy)
            .field("tool_failure_policy", &self.tool_failure_policy)
            .field("bind_addr", &self.bind_addr)
            .finish()
    }
}
