//! National Weather Service API client.
//!
//! A minimal fetcher: one GET per call with a fixed identifying user-agent
//! and the GeoJSON accept header, bounded by a timeout. Every failure mode
//! (timeout, DNS, non-2xx status, malformed body) collapses to `None`;
//! callers treat absence as "unavailable" and never retry.

use std::time::Duration;

use reqwest::header::{ACCEPT, USER_AGENT};
use serde_json::Value;
use tracing::{debug, warn};

use crate::core::config::WeatherConfig;

/// Per-call client for the NWS API. No connection pooling survives a call.
pub struct NwsClient {
    base_url: String,
    user_agent: String,
    timeout: Duration,
}

impl NwsClient {
    pub fn new(config: &WeatherConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            user_agent: config.user_agent.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// URL of the active-alerts feed for a US state code.
    pub fn alerts_url(&self, state: &str) -> String {
        format!("{}/alerts/active/area/{}", self.base_url, state)
    }

    /// URL of the point-metadata lookup for a coordinate.
    pub fn points_url(&self, latitude: f64, longitude: f64) -> String {
        format!("{}/points/{},{}", self.base_url, latitude, longitude)
    }

    /// Issue a single GET and parse the body as JSON. Any failure yields
    /// `None`.
    pub async fn get(&self, url: &str) -> Option<Value> {
        match self.try_get(url).await {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("NWS request to {} failed: {}", url, e);
                None
            }
        }
    }

    async fn try_get(&self, url: &str) -> Result<Value, reqwest::Error> {
        debug!("GET {}", url);
        let client = reqwest::Client::builder().timeout(self.timeout).build()?;
        let response = client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT, "application/geo+json")
            .send()
            .await?
            .error_for_status()?;
        response.json().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> NwsClient {
        NwsClient::new(&WeatherConfig::default())
    }

    #[test]
    fn test_alerts_url() {
        assert_eq!(
            client().alerts_url("CA"),
            "https://api.weather.gov/alerts/active/area/CA"
        );
    }

    #[test]
    fn test_points_url_formats_coordinates() {
        assert_eq!(
            client().points_url(38.8894, -77.0352),
            "https://api.weather.gov/points/38.8894,-77.0352"
        );
    }

    #[test]
    fn test_trailing_slash_in_base_url_is_trimmed() {
        let config = WeatherConfig {
            base_url: "https://api.weather.gov/".to_string(),
            ..WeatherConfig::default()
        };
        let client = NwsClient::new(&config);
        assert_eq!(
            client.alerts_url("NY"),
            "https://api.weather.gov/alerts/active/area/NY"
        );
    }

    #[tokio::test]
    async fn test_unreachable_host_yields_none() {
        let config = WeatherConfig {
            // Reserved TLD, guaranteed not to resolve.
            base_url: "https://nws.invalid".to_string(),
            ..WeatherConfig::default()
        };
        let client = NwsClient::new(&config);
        assert!(client.get("https://nws.invalid/alerts").await.is_none());
    }

    // Integration test (requires network, run with: cargo test -- --ignored)
    #[ignore]
    #[tokio::test]
    async fn test_live_alerts_feed_is_geojson() {
        let client = client();
        let data = client.get(&client.alerts_url("CA")).await;
        assert!(data.is_some_and(|d| d.get("features").is_some()));
    }
}
