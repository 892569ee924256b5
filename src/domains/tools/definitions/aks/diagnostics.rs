//! Diagnostic tools.
//!
//! Registry accessibility checks and in-cluster administrative command
//! execution. Both pass the CLI's stdout through unformatted.

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
use super::az;

// ============================================================================
// check_aks_acr
// ============================================================================

/// Parameters for the registry accessibility check.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CheckAcrParams {
    /// Name of the resource group.
    pub resource_group_name: String,

    /// Name of the AKS cluster.
    pub cluster_name: String,

    /// Name of the Azure Container Registry.
    pub acr_name: String,
}

/// Validates that an Azure Container Registry is reachable from a cluster.
pub struct CheckAcrTool;

impl CheckAcrTool {
    pub const NAME: &'static str = "check_aks_acr";
    pub const DESCRIPTION: &'static str =
        "Validate an Azure Container Registry is accessible from an AKS cluster.";

    pub fn build_command(params: &CheckAcrParams, config: &Config) -> CommandSpec {
        az(config)
            .args(["aks", "check-acr"])
            .flag("--resource-group", &params.resource_group_name)
            .flag("--name", &params.cluster_name)
            .flag("--acr", &params.acr_name)
            .context("checking ACR accessibility")
    }

    pub async fn execute(params: &CheckAcrParams, config: &Config) -> Result<String, ToolError> {
        let spec = Self::build_command(params, config);
        exec::run_text(&spec).await
    }

    pub fn to_tool() -> Tool {
        tool_model::<CheckAcrParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        text_route(
            Self::to_tool(),
            config,
            |params: CheckAcrParams, config: Arc<Config>| async move {
                Self::execute(&params, &config).await
            },
        )
    }
}

// ============================================================================
// aks_command_invoke
// ============================================================================

/// Parameters for running an administrative command inside the cluster.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CommandInvokeParams {
    /// Name of the resource group.
    pub resource_group_name: String,

    /// Name of the AKS cluster.
    pub cluster_name: String,

    /// The command to execute.
    pub command: String,
}

/// Executes a command inside the AKS cluster as an administrator.
pub struct CommandInvokeTool;

impl CommandInvokeTool {
    pub const NAME: &'static str = "aks_command_invoke";
    pub const DESCRIPTION: &'static str =
        "Execute a command in the AKS cluster as an administrator.";

    pub fn build_command(params: &CommandInvokeParams, config: &Config) -> CommandSpec {
        az(config)
            .args(["aks", "command", "invoke"])
            .flag("--resource-group", &params.resource_group_name)
            .flag("--name", &params.cluster_name)
            .flag("--command", &params.command)
            .context("executing cluster command")
    }

    pub async fn execute(
        params: &CommandInvokeParams,
        config: &Config,
    ) -> Result<String, ToolError> {
        info!(
            "Invoking command in cluster '{}': {}",
            params.cluster_name, params.command
        );
        let spec = Self::build_command(params, config);
        exec::run_text(&spec).await
    }

    pub fn to_tool() -> Tool {
        tool_model::<CommandInvokeParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        text_route(
            Self::to_tool(),
            config,
            |params: CommandInvokeParams, config: Arc<Config>| async move {
                Self::execute(&params, &config).await
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_acr_tokens() {
        let params = CheckAcrParams {
            resource_group_name: "rg1".to_string(),
            cluster_name: "aks1".to_string(),
            acr_name: "myregistry".to_string(),
        };
        let spec = CheckAcrTool::build_command(&params, &Config::default());
        assert_eq!(
            spec.tokens(),
            vec![
                "az",
                "aks",
                "check-acr",
                "--resource-group",
                "rg1",
                "--name",
                "aks1",
                "--acr",
                "myregistry",
            ]
        );
    }

    #[test]
    fn test_command_invoke_passes_command_as_single_token() {
        let params = CommandInvokeParams {
            resource_group_name: "rg1".to_string(),
            cluster_name: "aks1".to_string(),
            command: "kubectl get pods -A".to_string(),
        };
        let tokens = CommandInvokeTool::build_command(&params, &Config::default()).tokens();
        assert!(tokens.ends_with(&["--command".to_string(), "kubectl get pods -A".to_string()]));
    }
}
