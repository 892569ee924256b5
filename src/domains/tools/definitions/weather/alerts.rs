//! Active weather alerts tool.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRoute;
use rmcp::model::Tool;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use crate::core::config::Config;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::format::value_text;

use super::super::common::{text_route, tool_model};
use super::client::NwsClient;

/// Parameters for the alert lookup.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AlertsParams {
    /// Two-letter US state code (e.g. CA, NY).
    pub state: String,
}

/// Fetches the active weather alerts for a US state.
pub struct AlertsTool;

impl AlertsTool {
    pub const NAME: &'static str = "get_alerts";
    pub const DESCRIPTION: &'static str = "Get weather alerts for a US state.";

    pub async fn execute(params: &AlertsParams, config: &Config) -> Result<String, ToolError> {
        let client = NwsClient::new(&config.weather);
        let data = client.get(&client.alerts_url(&params.state)).await;
        Ok(Self::format_alerts(data.as_ref()))
    }

    fn format_alerts(data: Option<&Value>) -> String {
        let features = data.and_then(|d| d.get("features")).and_then(Value::as_array);
        let Some(features) = features else {
            return "Unable to fetch alerts or no alerts found.".to_string();
        };

        if features.is_empty() {
            return "No active alerts for this state.".to_string();
        }

        features
            .iter()
            .map(Self::format_alert)
            .collect::<Vec<_>>()
            .join("\n---\n")
    }

    fn format_alert(feature: &Value) -> String {
        let props = feature.get("properties").cloned().unwrap_or_default();
        let field = |key: &str, fallback: &str| match props.get(key) {
            None | Some(Value::Null) => fallback.to_string(),
            Some(value) => value_text(value),
        };

        format!(
            "Event: {}\nArea: {}\nSeverity: {}\nDescription: {}\nInstructions: {}",
            field("event", "Unknown"),
            field("areaDesc", "Unknown"),
            field("severity", "Unknown"),
            field("description", "No description available"),
            field("instruction", "No specific instructions provided"),
        )
    }

    pub fn to_tool() -> Tool {
        tool_model::<AlertsParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        text_route(
            Self::to_tool(),
            config,
            |params: AlertsParams, config: Arc<Config>| async move {
                Self::execute(&params, &config).await
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fetch_failure_message() {
        assert_eq!(
            AlertsTool::format_alerts(None),
            "Unable to fetch alerts or no alerts found."
        );
    }

    #[test]
    fn test_missing_features_key_message() {
        let data = json!({"title": "no features here"});
        assert_eq!(
            AlertsTool::format_alerts(Some(&data)),
            "Unable to fetch alerts or no alerts found."
        );
    }

    #[test]
    fn test_empty_features_is_no_active_alerts() {
        let data = json!({"features": []});
        assert_eq!(
            AlertsTool::format_alerts(Some(&data)),
            "No active alerts for this state."
        );
    }

    #[test]
    fn test_alert_block_fields_and_fallbacks() {
        let data = json!({
            "features": [
                {
                    "properties": {
                        "event": "Flood Warning",
                        "areaDesc": "Sacramento County",
                        "severity": "Severe",
                        "description": "River levels rising."
                    }
                },
                {
                    "properties": {}
                }
            ]
        });
        let text = AlertsTool::format_alerts(Some(&data));
        let blocks: Vec<&str> = text.split("\n---\n").collect();
        assert_eq!(blocks.len(), 2);
        assert_eq!(
            blocks[0],
            "Event: Flood Warning\n\
             Area: Sacramento County\n\
             Severity: Severe\n\
             Description: River levels rising.\n\
             Instructions: No specific instructions provided"
        );
        assert!(blocks[1].starts_with("Event: Unknown"));
        assert!(blocks[1].contains("Description: No description available"));
    }
}
