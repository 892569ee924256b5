//! Add-on management tools.
//!
//! Enables or disables a comma-separated set of named AKS add-ons.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRoute;
use rmcp::model::Tool;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::core::config::Config;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::exec::{self, CommandSpec};

use super::super::common::{text_route, tool_model};
use super::az;

/// Parameters for enabling or disabling add-ons.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddonsParams {
    /// Name of the resource group.
    pub resource_group_name: String,

    /// Name of the AKS cluster.
    pub cluster_name: String,

    /// Comma-separated list of add-ons
    /// (e.g., monitoring,virtual-node,http_application_routing,ingress-appgw).
    pub addons: String,
}

// ============================================================================
// enable_aks_addons
// ============================================================================

/// Enables add-ons on an AKS cluster.
pub struct EnableAddonsTool;

impl EnableAddonsTool {
    pub const NAME: &'static str = "enable_aks_addons";
    pub const DESCRIPTION: &'static str = "Enable add-ons for an AKS cluster.";

    pub fn build_command(params: &AddonsParams, config: &Config) -> CommandSpec {
        az(config)
            .args(["aks", "enable-addons"])
            .flag("--resource-group", &params.resource_group_name)
            .flag("--name", &params.cluster_name)
            .flag("--addons", &params.addons)
            .context("enabling add-ons")
    }

    pub async fn execute(params: &AddonsParams, config: &Config) -> Result<String, ToolError> {
        let spec = Self::build_command(params, config);
        exec::run(&spec).await?;
        Ok(format!(
            "Add-ons '{}' enabled for AKS cluster '{}' successfully.",
            params.addons, params.cluster_name
        ))
    }

    pub fn to_tool() -> Tool {
        tool_model::<AddonsParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        text_route(
            Self::to_tool(),
            config,
            |params: AddonsParams, config: Arc<Config>| async move {
                Self::execute(&params, &config).await
            },
        )
    }
}

// ============================================================================
// disable_aks_addons
// ============================================================================

/// Disables add-ons on an AKS cluster.
pub struct DisableAddonsTool;

impl DisableAddonsTool {
    pub const NAME: &'static str = "disable_aks_addons";
    pub const DESCRIPTION: &'static str = "Disable add-ons for an AKS cluster.";

    pub fn build_command(params: &AddonsParams, config: &Config) -> CommandSpec {
        az(config)
            .args(["aks", "disable-addons"])
            .flag("--resource-group", &params.resource_group_name)
            .flag("--name", &params.cluster_name)
            .flag("--addons", &params.addons)
            .context("disabling add-ons")
    }

    pub async fn execute(params: &AddonsParams, config: &Config) -> Result<String, ToolError> {
        let spec = Self::build_command(params, config);
        exec::run(&spec).await?;
        Ok(format!(
            "Add-ons '{}' disabled for AKS cluster '{}' successfully.",
            params.addons, params.cluster_name
        ))
    }

    pub fn to_tool() -> Tool {
        tool_model::<AddonsParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        text_route(
            Self::to_tool(),
            config,
            |params: AddonsParams, config: Arc<Config>| async move {
                Self::execute(&params, &config).await
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> AddonsParams {
        AddonsParams {
            resource_group_name: "rg1".to_string(),
            cluster_name: "aks1".to_string(),
            addons: "monitoring,ingress-appgw".to_string(),
        }
    }

    #[test]
    fn test_enable_passes_addons_through() {
        let spec = EnableAddonsTool::build_command(&params(), &Config::default());
        assert_eq!(
            spec.tokens(),
            vec![
                "az",
                "aks",
                "enable-addons",
                "--resource-group",
                "rg1",
                "--name",
                "aks1",
                "--addons",
                "monitoring,ingress-appgw",
            ]
        );
    }

    #[test]
    fn test_disable_uses_disable_subcommand() {
        let tokens = DisableAddonsTool::build_command(&params(), &Config::default()).tokens();
        assert_eq!(tokens[2], "disable-addons");
    }
}
