//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables, configuration files, or defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Main configuration structure for the MCP server.
///
/// This struct contains all configurable aspects of the server, organized
/// by domain for clarity and maintainability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Azure CLI invocation configuration.
    pub azure: AzureCliConfig,

    /// k8sgpt CLI invocation configuration.
    pub k8sgpt: K8sgptConfig,

    /// National Weather Service API configuration.
    pub weather: WeatherConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Configuration for invoking the Azure CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AzureCliConfig {
    /// Program name or path used to spawn the Azure CLI.
    pub program: String,
}

/// Configuration for invoking the k8sgpt CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct K8sgptConfig {
    /// Program name or path used to spawn k8sgpt.
    pub program: String,
}

/// Configuration for the National Weather Service API client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base origin for the NWS API.
    pub base_url: String,

    /// User-Agent header sent with every request (the NWS API requires one).
    pub user_agent: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for AzureCliConfig {
    fn default() -> Self {
        Self {
            program: "az".to_string(),
        }
    }
}

impl Default for K8sgptConfig {
    fn default() -> Self {
        Self {
            program: "k8sgpt".to_string(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.weather.gov".to_string(),
            user_agent: "weather-app/1.0".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "aks-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            azure: AzureCliConfig::default(),
            k8sgpt: K8sgptConfig::default(),
            weather: WeatherConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`, `MCP_AZ_PATH`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        if let Ok(program) = std::env::var("MCP_AZ_PATH") {
            info!("Using Azure CLI at {}", program);
            config.azure.program = program;
        }

        if let Ok(program) = std::env::var("MCP_K8SGPT_PATH") {
            info!("Using k8sgpt at {}", program);
            config.k8sgpt.program = program;
        }

        if let Ok(base_url) = std::env::var("MCP_NWS_BASE_URL") {
            config.weather.base_url = base_url;
        }

        if let Ok(user_agent) = std::env::var("MCP_NWS_USER_AGENT") {
            config.weather.user_agent = user_agent;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_default_cli_programs() {
        let config = Config::default();
        assert_eq!(config.azure.program, "az");
        assert_eq!(config.k8sgpt.program, "k8sgpt");
    }

    #[test]
    fn test_default_weather_config() {
        let config = Config::default();
        assert_eq!(config.weather.base_url, "https://api.weather.gov");
        assert_eq!(config.weather.user_agent, "weather-app/1.0");
        assert_eq!(config.weather.timeout_secs, 30);
    }

    #[test]
    fn test_az_path_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_AZ_PATH", "/usr/local/bin/az");
        }
        let config = Config::from_env();
        assert_eq!(config.azure.program, "/usr/local/bin/az");
        unsafe {
            std::env::remove_var("MCP_AZ_PATH");
        }
    }

    #[test]
    fn test_nws_base_url_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_NWS_BASE_URL", "http://127.0.0.1:9999");
        }
        let config = Config::from_env();
        assert_eq!(config.weather.base_url, "http://127.0.0.1:9999");
        unsafe {
            std::env::remove_var("MCP_NWS_BASE_URL");
        }
    }
}
