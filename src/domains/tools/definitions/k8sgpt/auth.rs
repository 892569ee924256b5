//! Backend authentication tool.
//!
//! Configures the AI provider k8sgpt analyzes with. The server runs detached
//! from any terminal, so when no API key is supplied the tool prints manual
//! setup instructions instead of letting the CLI prompt interactively.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRoute;
use rmcp::model::Tool;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use crate::core::config::Config;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::exec::{self, CommandSpec};

use super::super::common::{text_route, tool_model};
use super::k8sgpt;

fn default_provider() -> String {
    "azureopenai".to_string()
}

/// Parameters for configuring k8sgpt authentication.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ConfigureAuthParams {
    /// AI provider to configure (default: azureopenai).
    #[serde(default = "default_provider")]
    pub provider: String,

    /// API key for the provider (if not provided, manual setup instructions
    /// are returned instead).
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Configures k8sgpt authentication for an AI provider.
pub struct ConfigureAuthTool;

impl ConfigureAuthTool {
    pub const NAME: &'static str = "k8sgpt_configure_auth";
    pub const DESCRIPTION: &'static str = "Configure k8sgpt authentication for AI provider.";

    /// The version probe run first to verify k8sgpt is installed.
    pub fn build_probe(config: &Config) -> CommandSpec {
        k8sgpt(config)
            .arg("--version")
            .context("configuring k8sgpt authentication")
    }

    /// The `auth add` command used when an API key is supplied.
    pub fn build_auth_command(params: &ConfigureAuthParams, key: &str, config: &Config) -> CommandSpec {
        k8sgpt(config)
            .args(["auth", "add"])
            .flag("-p", &params.provider)
            .flag("--password", key)
            .sensitive()
            .context("configuring k8sgpt authentication")
    }

    pub async fn execute(
        params: &ConfigureAuthParams,
        config: &Config,
    ) -> Result<String, ToolError> {
        // Verify the binary exists before deciding what to tell the user.
        exec::run(&Self::build_probe(config)).await?;

        match params.api_key.as_deref() {
            Some(key) => {
                info!("Configuring k8sgpt auth for provider {}", params.provider);
                let spec = Self::build_auth_command(params, key, config);
                exec::run(&spec).await?;
                Ok(format!(
                    "Successfully configured {} authentication for k8sgpt.",
                    params.provider
                ))
            }
            // No key supplied: never prompt interactively, print the manual
            // setup steps instead.
            None => Ok(format!(
                "To configure {provider} authentication for k8sgpt, please run the \
                 following command in your terminal:\n\n\
                 k8sgpt auth add -p {provider}\n\n\
                 You will be prompted to enter your API key.",
                provider = params.provider
            )),
        }
    }

    pub fn to_tool() -> Tool {
        tool_model::<ConfigureAuthParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        text_route(
            Self::to_tool(),
            config,
            |params: ConfigureAuthParams, config: Arc<Config>| async move {
                Self::execute(&params, &config).await
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_provider() {
        let params: ConfigureAuthParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.provider, "azureopenai");
        assert!(params.api_key.is_none());
    }

    #[test]
    fn test_auth_command_tokens() {
        let params = ConfigureAuthParams {
            provider: "openai".to_string(),
            api_key: Some("sk-test".to_string()),
        };
        let spec =
            ConfigureAuthTool::build_auth_command(&params, "sk-test", &Config::default());
        assert_eq!(
            spec.tokens(),
            vec!["k8sgpt", "auth", "add", "-p", "openai", "--password", "sk-test"]
        );
    }

    #[test]
    fn test_probe_is_version_check() {
        let spec = ConfigureAuthTool::build_probe(&Config::default());
        assert_eq!(spec.tokens(), vec!["k8sgpt", "--version"]);
    }

    #[tokio::test]
    async fn test_missing_binary_reports_install_hint() {
        let mut config = Config::default();
        config.k8sgpt.program = "definitely-not-a-real-k8sgpt".to_string();
        let params: ConfigureAuthParams = serde_json::from_str("{}").unwrap();
        let err = ConfigureAuthTool::execute(&params, &config).await.unwrap_err();
        assert_eq!(err.kind(), "not_installed");
        assert!(err.to_string().contains("brew install k8sgpt"));
    }
}
