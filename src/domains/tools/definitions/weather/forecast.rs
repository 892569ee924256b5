//! Point forecast tool.
//!
//! Two strictly sequential dependent calls: the coordinate is first resolved
//! to a forecast-grid URL via the points endpoint, then that exact URL is
//! fetched for the forecast periods.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRoute;
use rmcp::model::Tool;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use crate::core::config::Config;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::format::field_text;

use super::super::common::{text_route, tool_model};
use super::client::NwsClient;

/// Parameters for the forecast lookup.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ForecastParams {
    /// Latitude of the location.
    pub latitude: f64,

    /// Longitude of the location.
    pub longitude: f64,
}

/// Fetches a short forecast for a coordinate.
pub struct ForecastTool;

impl ForecastTool {
    pub const NAME: &'static str = "get_forecast";
    pub const DESCRIPTION: &'static str = "Get weather forecast for a location.";

    /// At most this many forecast periods are rendered.
    pub const MAX_PERIODS: usize = 5;

    pub async fn execute(params: &ForecastParams, config: &Config) -> Result<String, ToolError> {
        let client = NwsClient::new(&config.weather);

        let points_url = client.points_url(params.latitude, params.longitude);
        let Some(points) = client.get(&points_url).await else {
            return Ok("Unable to fetch forecast data for this location.".to_string());
        };

        // The second request goes to exactly the URL the points response names.
        let Some(forecast_url) = Self::forecast_url(&points) else {
            return Ok("Unable to fetch detailed forecast.".to_string());
        };
        let Some(forecast) = client.get(&forecast_url).await else {
            return Ok("Unable to fetch detailed forecast.".to_string());
        };

        Ok(Self::format_forecast(&forecast))
    }

    /// Extract the forecast-grid URL from a points response.
    pub fn forecast_url(points: &Value) -> Option<String> {
        points
            .pointer("/properties/forecast")
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    fn format_forecast(forecast: &Value) -> String {
        let periods = forecast
            .pointer("/properties/periods")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        if periods.is_empty() {
            return "No forecast periods available.".to_string();
        }

        periods
            .iter()
            .take(Self::MAX_PERIODS)
            .map(Self::format_period)
            .collect::<Vec<_>>()
            .join("\n---\n")
    }

    fn format_period(period: &Value) -> String {
        format!(
            "{}:\nTemperature: {}°{}\nWind: {} {}\nForecast: {}",
            field_text(period, "name"),
            field_text(period, "temperature"),
            field_text(period, "temperatureUnit"),
            field_text(period, "windSpeed"),
            field_text(period, "windDirection"),
            field_text(period, "detailedForecast"),
        )
    }

    pub fn to_tool() -> Tool {
        tool_model::<ForecastParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        text_route(
            Self::to_tool(),
            config,
            |params: ForecastParams, config: Arc<Config>| async move {
                Self::execute(&params, &config).await
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn period(name: &str) -> Value {
        json!({
            "name": name,
            "temperature": 72,
            "temperatureUnit": "F",
            "windSpeed": "10 mph",
            "windDirection": "NW",
            "detailedForecast": "Sunny with light winds."
        })
    }

    #[test]
    fn test_forecast_url_is_taken_verbatim_from_points() {
        let points = json!({
            "properties": {
                "forecast": "https://api.weather.gov/gridpoints/LWX/97,71/forecast"
            }
        });
        assert_eq!(
            ForecastTool::forecast_url(&points).as_deref(),
            Some("https://api.weather.gov/gridpoints/LWX/97,71/forecast")
        );
    }

    #[test]
    fn test_forecast_url_missing_is_none() {
        assert!(ForecastTool::forecast_url(&json!({"properties": {}})).is_none());
        assert!(ForecastTool::forecast_url(&json!({})).is_none());
    }

    #[test]
    fn test_format_forecast_truncates_to_five_periods() {
        let periods: Vec<Value> = (0..14).map(|i| period(&format!("Period {i}"))).collect();
        let forecast = json!({"properties": {"periods": periods}});
        let text = ForecastTool::format_forecast(&forecast);
        let blocks: Vec<&str> = text.split("\n---\n").collect();
        assert_eq!(blocks.len(), 5);
        assert!(blocks[0].starts_with("Period 0:"));
        assert!(blocks[4].starts_with("Period 4:"));
        assert!(!text.contains("Period 5"));
    }

    #[test]
    fn test_format_forecast_period_block() {
        let forecast = json!({"properties": {"periods": [period("Tonight")]}});
        let text = ForecastTool::format_forecast(&forecast);
        assert_eq!(
            text,
            "Tonight:\n\
             Temperature: 72°F\n\
             Wind: 10 mph NW\n\
             Forecast: Sunny with light winds."
        );
    }

    #[test]
    fn test_format_forecast_no_periods_sentence() {
        let forecast = json!({"properties": {"periods": []}});
        assert_eq!(
            ForecastTool::format_forecast(&forecast),
            "No forecast periods available."
        );
    }
}
