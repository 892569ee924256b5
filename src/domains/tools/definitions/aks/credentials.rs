//! Credential management tools.
//!
//! Kubeconfig retrieval (user and admin, both with overwrite-existing
//! semantics), certificate rotation, and the kubectl/kubelogin installer.

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
// set_aks_credentials
// ============================================================================

/// Parameters identifying the cluster whose credentials are fetched.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CredentialsParams {
    /// Name of the AKS cluster.
    pub cluster_name: String,

    /// Name of the resource group.
    pub resource_group_name: String,
}

/// Merges the cluster's user kubeconfig into the local configuration,
/// overwriting any existing entry.
pub struct GetCredentialsTool;

impl GetCredentialsTool {
    pub const NAME: &'static str = "set_aks_credentials";
    pub const DESCRIPTION: &'static str = "Set AKS credentials using the Azure CLI.";

    pub fn build_command(params: &CredentialsParams, config: &Config) -> CommandSpec {
        az(config)
            .args(["aks", "get-credentials"])
            .flag("--resource-group", &params.resource_group_name)
            .flag("--name", &params.cluster_name)
            .switch("--overwrite-existing")
    }

    pub async fn execute(
        params: &CredentialsParams,
        config: &Config,
    ) -> Result<String, ToolError> {
        let spec = Self::build_command(params, config);
        exec::run(&spec).await?;
        Ok(format!(
            "Credentials for AKS cluster '{}' set successfully.",
            params.cluster_name
        ))
    }

    pub fn to_tool() -> Tool {
        tool_model::<CredentialsParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        text_route(
            Self::to_tool(),
            config,
            |params: CredentialsParams, config: Arc<Config>| async move {
                Self::execute(&params, &config).await
            },
        )
    }
}

// ============================================================================
// get_aks_credentials_admin
// ============================================================================

/// Fetches admin credentials for a cluster.
pub struct GetAdminCredentialsTool;

impl GetAdminCredentialsTool {
    pub const NAME: &'static str = "get_aks_credentials_admin";
    pub const DESCRIPTION: &'static str = "Get admin credentials for an AKS cluster.";

    pub fn build_command(params: &CredentialsParams, config: &Config) -> CommandSpec {
        az(config)
            .args(["aks", "get-credentials"])
            .flag("--resource-group", &params.resource_group_name)
            .flag("--name", &params.cluster_name)
            .switch("--admin")
            .switch("--overwrite-existing")
            .context("getting admin credentials")
    }

    pub async fn execute(
        params: &CredentialsParams,
        config: &Config,
    ) -> Result<String, ToolError> {
        let spec = Self::build_command(params, config);
        exec::run(&spec).await?;
        Ok(format!(
            "Admin credentials for AKS cluster '{}' set successfully.",
            params.cluster_name
        ))
    }

    pub fn to_tool() -> Tool {
        tool_model::<CredentialsParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        text_route(
            Self::to_tool(),
            config,
            |params: CredentialsParams, config: Arc<Config>| async move {
                Self::execute(&params, &config).await
            },
        )
    }
}

// ============================================================================
// rotate_aks_certs
// ============================================================================

/// Parameters identifying the cluster whose certificates are rotated.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RotateCertsParams {
    /// Name of the resource group.
    pub resource_group_name: String,

    /// Name of the AKS cluster.
    pub cluster_name: String,
}

/// Rotates certificates and keys for a cluster.
pub struct RotateCertsTool;

impl RotateCertsTool {
    pub const NAME: &'static str = "rotate_aks_certs";
    pub const DESCRIPTION: &'static str = "Rotate certificates and keys for an AKS cluster.";

    pub fn build_command(params: &RotateCertsParams, config: &Config) -> CommandSpec {
        az(config)
            .args(["aks", "rotate-certs"])
            .flag("--resource-group", &params.resource_group_name)
            .flag("--name", &params.cluster_name)
            .context("rotating certificates")
    }

    pub async fn execute(
        params: &RotateCertsParams,
        config: &Config,
    ) -> Result<String, ToolError> {
        info!("Rotating certificates for cluster '{}'", params.cluster_name);
        let spec = Self::build_command(params, config);
        exec::run(&spec).await?;
        Ok(format!(
            "Certificate rotation initiated for AKS cluster '{}'.",
            params.cluster_name
        ))
    }

    pub fn to_tool() -> Tool {
        tool_model::<RotateCertsParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        text_route(
            Self::to_tool(),
            config,
            |params: RotateCertsParams, config: Arc<Config>| async move {
                Self::execute(&params, &config).await
            },
        )
    }
}

// ============================================================================
// install_aks_cli
// ============================================================================

/// `install_aks_cli` takes no parameters.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct InstallCliParams {}

/// Downloads and installs kubectl and kubelogin via the Azure CLI.
pub struct InstallCliTool;

impl InstallCliTool {
    pub const NAME: &'static str = "install_aks_cli";
    pub const DESCRIPTION: &'static str =
        "Download and install kubectl, the Kubernetes command-line tool.";

    pub fn build_command(config: &Config) -> CommandSpec {
        az(config)
            .args(["aks", "install-cli"])
            .context("installing kubectl and kubelogin")
    }

    pub async fn execute(config: &Config) -> Result<String, ToolError> {
        let spec = Self::build_command(config);
        exec::run(&spec).await?;
        Ok("Successfully installed kubectl and kubelogin.".to_string())
    }

    pub fn to_tool() -> Tool {
        tool_model::<InstallCliParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        text_route(
            Self::to_tool(),
            config,
            |_params: InstallCliParams, config: Arc<Config>| async move {
                Self::execute(&config).await
            },
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config::default()
    }

    fn params() -> CredentialsParams {
        CredentialsParams {
            cluster_name: "aks1".to_string(),
            resource_group_name: "rg1".to_string(),
        }
    }

    #[test]
    fn test_credentials_overwrite_existing() {
        let spec = GetCredentialsTool::build_command(&params(), &test_config());
        assert_eq!(
            spec.tokens(),
            vec![
                "az",
                "aks",
                "get-credentials",
                "--resource-group",
                "rg1",
                "--name",
                "aks1",
                "--overwrite-existing",
            ]
        );
    }

    #[test]
    fn test_admin_credentials_add_admin_switch() {
        let tokens = GetAdminCredentialsTool::build_command(&params(), &test_config()).tokens();
        assert!(tokens.contains(&"--admin".to_string()));
        assert!(tokens.contains(&"--overwrite-existing".to_string()));
    }

    #[test]
    fn test_install_cli_tokens() {
        let spec = InstallCliTool::build_command(&test_config());
        assert_eq!(spec.tokens(), vec!["az", "aks", "install-cli"]);
    }

    #[test]
    fn test_install_cli_params_accept_empty_object() {
        let params: InstallCliParams = serde_json::from_str("{}").unwrap();
        let _ = params;
    }
}
