//! get_weather - current temperature from the Open-Meteo forecast API

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{RelayError, Result};
use crate::tools::Tool;

const CURRENT_FIELDS: &str = "temperature_2m,wind_speed_10m";
const HOURLY_FIELDS: &str = "temperature_2m,relative_humidity_2m,wind_speed_10m";

/// Arguments for `get_weather`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetWeatherArgs {
    pub latitude: f64,
    pub longitude: f64,
}

/// Tool that looks up the current temperature (celsius) for coordinates
#[derive(Debug, Clone)]
pub struct GetWeatherTool {
    client: Client,
    api_url: String,
}

impl GetWeatherTool {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into(),
        }
    }
}

#[async_trait]
impl Tool for GetWeatherTool {
    type Args = GetWeatherArgs;

    fn name(&self) -> &'static str {
        "get_weather"
    }

    fn description(&self) -> &'static str {
        "Get current temperature for provided coordinates in celsius."
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "latitude": { "type": "number" },
                "longitude": { "type": "number" }
            },
            "required": ["latitude", "longitude"],
            "additionalProperties": false
        })
    }

    async fn execute(&self, args: GetWeatherArgs) -> Result<String> {
        debug!(
            latitude = args.latitude,
            longitude = args.longitude,
            "Fetching current weather"
        );

        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("latitude", args.latitude.to_string()),
                ("longitude", args.longitude.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
                ("hourly", HOURLY_FIELDS.to_string()),
            ])
            .send()
            .await
            .map_err(|e| RelayError::tool(format!("Weather request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(RelayError::tool(format!(
                "Weather API error ({}): {}",
                status, error_text
            )));
        }

        let data: Value = response
            .json()
            .await
            .map_err(|e| RelayError::tool(format!("Invalid weather response: {}", e)))?;

        data.get("current")
            .and_then(|current| current.get("temperature_2m"))
            .filter(|temperature| !temperature.is_null())
            .map(Value::to_string)
            .ok_or_else(|| RelayError::tool("Weather response has no current.temperature_2m"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_definition() {
        let tool = GetWeatherTool::new("http://localhost/forecast");
        let schema = tool.parameters_schema();
        assert_eq!(schema["required"], json!(["latitude", "longitude"]));
        assert_eq!(schema["additionalProperties"], json!(false));
        assert!(tool.strict());
    }

    #[test]
    fn test_args_decode() {
        let tool = GetWeatherTool::new("http://localhost/forecast");
        let args = tool
            .decode_arguments(json!({"latitude": 48.85, "longitude": 2.35}))
            .unwrap();
        assert_eq!(
            args,
            GetWeatherArgs {
                latitude: 48.85,
                longitude: 2.35
            }
        );

        assert!(tool
            .decode_arguments(json!({"latitude": "north", "longitude": 2.35}))
            .is_err());
        assert!(tool.decode_arguments(json!({"latitude": 1.0})).is_err());
    }

    #[tokio::test]
    async fn test_returns_current_temperature() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .and(query_param("latitude", "48.85"))
            .and(query_param("longitude", "2.35"))
            .and(query_param("current", CURRENT_FIELDS))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "latitude": 48.86,
                "longitude": 2.34,
                "current": {"time": "2024-01-01T12:00", "temperature_2m": 15.2, "wind_speed_10m": 9.7}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let tool = GetWeatherTool::new(format!("{}/v1/forecast", server.uri()));
        let result = tool
            .execute(GetWeatherArgs {
                latitude: 48.85,
                longitude: 2.35,
            })
            .await
            .unwrap();

        assert_eq!(result, "15.2");
    }

    #[tokio::test]
    async fn test_upstream_error_is_tool_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let tool = GetWeatherTool::new(format!("{}/v1/forecast", server.uri()));
        let err = tool
            .execute(GetWeatherArgs {
                latitude: 0.0,
                longitude: 0.0,
            })
            .await
            .unwrap_err();

        match err {
            RelayError::ToolExecution(message) => {
                assert!(message.contains("503"), "message: {}", message);
                assert!(message.contains("maintenance"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_temperature_is_tool_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"current": {}})))
            .mount(&server)
            .await;

        let tool = GetWeatherTool::new(server.uri());
        let err = tool
            .execute(GetWeatherArgs {
                latitude: 0.0,
                longitude: 0.0,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RelayError::ToolExecution(_)));
    }
}
