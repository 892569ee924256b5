//! Cluster lifecycle tools.
//!
//! Wrappers around the cluster-scoped `az aks` commands: list, show, create,
//! delete, start, stop, scale, upgrade and update. Lifecycle commands return
//! an acknowledgment as soon as the CLI accepts the operation; they do not
//! wait for the underlying asynchronous cluster operation to finish.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRoute;
use rmcp::model::Tool;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::core::config::Config;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::exec::{self, CommandSpec};
use crate::domains::tools::format::{parse_json, render_blocks, value_text};

use super::super::common::{text_route, tool_model};
use super::az;

// ============================================================================
// get_aks_clusters
// ============================================================================

/// Parameters for listing AKS clusters.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ClusterListParams {
    /// Filter parameter (resource group name); leave unset to list all clusters.
    #[serde(default)]
    pub state: Option<String>,
}

/// Lists AKS clusters visible to the signed-in Azure account.
pub struct ClusterListTool;

impl ClusterListTool {
    pub const NAME: &'static str = "get_aks_clusters";
    pub const DESCRIPTION: &'static str =
        "Get Azure AKS clusters using the Azure CLI. Optionally filter by resource group.";

    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("Name", "name"),
        ("Resource Group", "resourceGroup"),
        ("Location", "location"),
        ("Kubernetes Version", "kubernetesVersion"),
        ("Status", "provisioningState"),
    ];

    pub fn build_command(params: &ClusterListParams, config: &Config) -> CommandSpec {
        let mut spec = az(config).args(["aks", "list"]);
        let filter = params.state.as_deref().map(str::trim).filter(|s| !s.is_empty());
        if let Some(group) = filter {
            spec = spec.flag("--resource-group", group);
        }
        spec
    }

    pub async fn execute(
        params: &ClusterListParams,
        config: &Config,
    ) -> Result<String, ToolError> {
        let spec = Self::build_command(params, config);
        let stdout = exec::run_text(&spec).await?;
        let clusters = parse_json(&stdout, "Azure CLI output")?;
        let records = clusters.as_array().map(Vec::as_slice).unwrap_or_default();
        Ok(Self::format_clusters(records))
    }

    fn format_clusters(clusters: &[Value]) -> String {
        if clusters.is_empty() {
            return "No AKS clusters found.".to_string();
        }
        render_blocks(clusters, Self::FIELDS)
    }

    pub fn to_tool() -> Tool {
        tool_model::<ClusterListParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        text_route(
            Self::to_tool(),
            config,
            |params: ClusterListParams, config: Arc<Config>| async move {
                Self::execute(&params, &config).await
            },
        )
    }
}

// ============================================================================
// show_aks_cluster
// ============================================================================

/// Parameters identifying one cluster.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ClusterShowParams {
    /// Name of the AKS cluster.
    pub cluster_name: String,

    /// Name of the resource group.
    pub resource_group_name: String,
}

/// Shows the full property set of a specific AKS cluster.
pub struct ClusterShowTool;

impl ClusterShowTool {
    pub const NAME: &'static str = "show_aks_cluster";
    pub const DESCRIPTION: &'static str =
        "Show details of a specific AKS cluster using the Azure CLI.";

    pub fn build_command(params: &ClusterShowParams, config: &Config) -> CommandSpec {
        az(config)
            .args(["aks", "show"])
            .flag("--name", &params.cluster_name)
            .flag("--resource-group", &params.resource_group_name)
    }

    pub async fn execute(
        params: &ClusterShowParams,
        config: &Config,
    ) -> Result<String, ToolError> {
        let spec = Self::build_command(params, config);
        let stdout = exec::run_text(&spec).await?;
        let details = parse_json(&stdout, "Azure CLI output")?;
        Ok(Self::format_cluster(&details))
    }

    fn format_cluster(details: &Value) -> String {
        let Some(map) = details.as_object().filter(|m| !m.is_empty()) else {
            return "No AKS cluster found.".to_string();
        };

        let mut lines = Vec::new();
        for (key, value) in map {
            lines.push(format!("{}: {}", key, value_text(value)));
            lines.push("---".to_string());
        }
        lines.join("\n")
    }

    pub fn to_tool() -> Tool {
        tool_model::<ClusterShowParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        text_route(
            Self::to_tool(),
            config,
            |params: ClusterShowParams, config: Arc<Config>| async move {
                Self::execute(&params, &config).await
            },
        )
    }
}

// ============================================================================
// create_aks_cluster
// ============================================================================

fn default_node_count() -> i64 {
    1
}

fn default_vm_size() -> String {
    "Standard_DS2_v2".to_string()
}

/// Parameters for creating a cluster.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ClusterCreateParams {
    /// Name of the resource group.
    pub resource_group_name: String,

    /// Name of the AKS cluster to create.
    pub cluster_name: String,

    /// Number of nodes in the cluster (default: 1).
    #[serde(default = "default_node_count")]
    pub node_count: i64,

    /// VM size for the nodes (default: Standard_DS2_v2).
    #[serde(default = "default_vm_size")]
    pub node_vm_size: String,

    /// Kubernetes version to use (default: latest stable).
    #[serde(default)]
    pub kubernetes_version: Option<String>,
}

/// Creates a new AKS cluster.
pub struct ClusterCreateTool;

impl ClusterCreateTool {
    pub const NAME: &'static str = "create_aks_cluster";
    pub const DESCRIPTION: &'static str = "Create a new AKS cluster using the Azure CLI.";

    pub fn build_command(params: &ClusterCreateParams, config: &Config) -> CommandSpec {
        az(config)
            .args(["aks", "create"])
            .flag("--resource-group", &params.resource_group_name)
            .flag("--name", &params.cluster_name)
            .flag("--node-count", params.node_count)
            .flag("--node-vm-size", &params.node_vm_size)
            .switch("--generate-ssh-keys")
            .flag_opt("--kubernetes-version", params.kubernetes_version.as_deref())
            .context("creating AKS cluster")
    }

    pub async fn execute(
        params: &ClusterCreateParams,
        config: &Config,
    ) -> Result<String, ToolError> {
        info!("Creating AKS cluster '{}'", params.cluster_name);
        let spec = Self::build_command(params, config);
        exec::run(&spec).await?;
        Ok(format!(
            "AKS cluster '{}' created successfully.",
            params.cluster_name
        ))
    }

    pub fn to_tool() -> Tool {
        tool_model::<ClusterCreateParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        text_route(
            Self::to_tool(),
            config,
            |params: ClusterCreateParams, config: Arc<Config>| async move {
                Self::execute(&params, &config).await
            },
        )
    }
}

// ============================================================================
// delete_aks_cluster
// ============================================================================

/// Parameters for deleting a cluster.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ClusterDeleteParams {
    /// Name of the resource group.
    pub resource_group_name: String,

    /// Name of the AKS cluster to delete.
    pub cluster_name: String,
}

/// Deletes an AKS cluster without interactive confirmation.
pub struct ClusterDeleteTool;

impl ClusterDeleteTool {
    pub const NAME: &'static str = "delete_aks_cluster";
    pub const DESCRIPTION: &'static str = "Delete an AKS cluster using the Azure CLI.";

    pub fn build_command(params: &ClusterDeleteParams, config: &Config) -> CommandSpec {
        az(config)
            .args(["aks", "delete"])
            .flag("--resource-group", &params.resource_group_name)
            .flag("--name", &params.cluster_name)
            .switch("--yes")
            .context("deleting AKS cluster")
    }

    pub async fn execute(
        params: &ClusterDeleteParams,
        config: &Config,
    ) -> Result<String, ToolError> {
        info!("Deleting AKS cluster '{}'", params.cluster_name);
        let spec = Self::build_command(params, config);
        exec::run(&spec).await?;
        Ok(format!(
            "AKS cluster '{}' deletion initiated.",
            params.cluster_name
        ))
    }

    pub fn to_tool() -> Tool {
        tool_model::<ClusterDeleteParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        text_route(
            Self::to_tool(),
            config,
            |params: ClusterDeleteParams, config: Arc<Config>| async move {
                Self::execute(&params, &config).await
            },
        )
    }
}

// ============================================================================
// start_aks_cluster / stop_aks_cluster
// ============================================================================

/// Parameters identifying the cluster to start or stop.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ClusterPowerParams {
    /// Name of the resource group.
    pub resource_group_name: String,

    /// Name of the AKS cluster.
    pub cluster_name: String,
}

/// Starts a previously stopped AKS cluster.
pub struct ClusterStartTool;

impl ClusterStartTool {
    pub const NAME: &'static str = "start_aks_cluster";
    pub const DESCRIPTION: &'static str = "Start a previously stopped AKS cluster.";

    pub fn build_command(params: &ClusterPowerParams, config: &Config) -> CommandSpec {
        az(config)
            .args(["aks", "start"])
            .flag("--resource-group", &params.resource_group_name)
            .flag("--name", &params.cluster_name)
            .context("starting AKS cluster")
    }

    pub async fn execute(
        params: &ClusterPowerParams,
        config: &Config,
    ) -> Result<String, ToolError> {
        let spec = Self::build_command(params, config);
        exec::run(&spec).await?;
        Ok(format!("AKS cluster '{}' is starting.", params.cluster_name))
    }

    pub fn to_tool() -> Tool {
        tool_model::<ClusterPowerParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        text_route(
            Self::to_tool(),
            config,
            |params: ClusterPowerParams, config: Arc<Config>| async move {
                Self::execute(&params, &config).await
            },
        )
    }
}

/// Stops a running AKS cluster.
pub struct ClusterStopTool;

impl ClusterStopTool {
    pub const NAME: &'static str = "stop_aks_cluster";
    pub const DESCRIPTION: &'static str = "Stop a running AKS cluster.";

    pub fn build_command(params: &ClusterPowerParams, config: &Config) -> CommandSpec {
        az(config)
            .args(["aks", "stop"])
            .flag("--resource-group", &params.resource_group_name)
            .flag("--name", &params.cluster_name)
            .context("stopping AKS cluster")
    }

    pub async fn execute(
        params: &ClusterPowerParams,
        config: &Config,
    ) -> Result<String, ToolError> {
        let spec = Self::build_command(params, config);
        exec::run(&spec).await?;
        Ok(format!("AKS cluster '{}' is stopping.", params.cluster_name))
    }

    pub fn to_tool() -> Tool {
        tool_model::<ClusterPowerParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        text_route(
            Self::to_tool(),
            config,
            |params: ClusterPowerParams, config: Arc<Config>| async move {
                Self::execute(&params, &config).await
            },
        )
    }
}

// ============================================================================
// scale_aks_cluster
// ============================================================================

/// Parameters for scaling a cluster.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ClusterScaleParams {
    /// Name of the resource group.
    pub resource_group_name: String,

    /// Name of the AKS cluster to scale.
    pub cluster_name: String,

    /// New node count for the cluster.
    pub node_count: i64,
}

/// Changes the node count of an AKS cluster.
pub struct ClusterScaleTool;

impl ClusterScaleTool {
    pub const NAME: &'static str = "scale_aks_cluster";
    pub const DESCRIPTION: &'static str = "Scale an AKS cluster by changing the number of nodes.";

    pub fn build_command(params: &ClusterScaleParams, config: &Config) -> CommandSpec {
        az(config)
            .args(["aks", "scale"])
            .flag("--resource-group", &params.resource_group_name)
            .flag("--name", &params.cluster_name)
            .flag("--node-count", params.node_count)
            .context("scaling AKS cluster")
    }

    pub async fn execute(
        params: &ClusterScaleParams,
        config: &Config,
    ) -> Result<String, ToolError> {
        let spec = Self::build_command(params, config);
        exec::run(&spec).await?;
        Ok(format!(
            "AKS cluster '{}' scaled to {} nodes.",
            params.cluster_name, params.node_count
        ))
    }

    pub fn to_tool() -> Tool {
        tool_model::<ClusterScaleParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        text_route(
            Self::to_tool(),
            config,
            |params: ClusterScaleParams, config: Arc<Config>| async move {
                Self::execute(&params, &config).await
            },
        )
    }
}

// ============================================================================
// upgrade_aks_cluster
// ============================================================================

/// Parameters for upgrading a cluster.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ClusterUpgradeParams {
    /// Name of the resource group.
    pub resource_group_name: String,

    /// Name of the AKS cluster to upgrade.
    pub cluster_name: String,

    /// Target Kubernetes version.
    pub kubernetes_version: String,
}

/// Upgrades an AKS cluster to a specific Kubernetes version.
pub struct ClusterUpgradeTool;

impl ClusterUpgradeTool {
    pub const NAME: &'static str = "upgrade_aks_cluster";
    pub const DESCRIPTION: &'static str =
        "Upgrade an AKS cluster to a specific Kubernetes version.";

    pub fn build_command(params: &ClusterUpgradeParams, config: &Config) -> CommandSpec {
        az(config)
            .args(["aks", "upgrade"])
            .flag("--resource-group", &params.resource_group_name)
            .flag("--name", &params.cluster_name)
            .flag("--kubernetes-version", &params.kubernetes_version)
            .context("upgrading AKS cluster")
    }

    pub async fn execute(
        params: &ClusterUpgradeParams,
        config: &Config,
    ) -> Result<String, ToolError> {
        info!(
            "Upgrading AKS cluster '{}' to {}",
            params.cluster_name, params.kubernetes_version
        );
        let spec = Self::build_command(params, config);
        exec::run(&spec).await?;
        Ok(format!(
            "AKS cluster '{}' upgrade to version {} initiated.",
            params.cluster_name, params.kubernetes_version
        ))
    }

    pub fn to_tool() -> Tool {
        tool_model::<ClusterUpgradeParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        text_route(
            Self::to_tool(),
            config,
            |params: ClusterUpgradeParams, config: Arc<Config>| async move {
                Self::execute(&params, &config).await
            },
        )
    }
}

// ============================================================================
// update_aks_cluster
// ============================================================================

/// Parameters for updating cluster properties. All property fields are
/// optional; absent fields leave the cluster unchanged.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ClusterUpdateParams {
    /// Name of the resource group.
    pub resource_group_name: String,

    /// Name of the AKS cluster to update.
    pub cluster_name: String,

    /// Target Kubernetes version (optional).
    #[serde(default)]
    pub kubernetes_version: Option<String>,

    /// Auto upgrade channel (none, patch, stable, rapid, node-image) (optional).
    #[serde(default)]
    pub auto_upgrade_channel: Option<String>,

    /// Enable or disable nodes having public IPs (optional).
    #[serde(default)]
    pub enable_node_public_ip: Option<bool>,

    /// Space-separated tags in 'key[=value]' format (optional).
    #[serde(default)]
    pub tags: Option<String>,
}

/// Updates mutable properties of an AKS cluster.
pub struct ClusterUpdateTool;

impl ClusterUpdateTool {
    pub const NAME: &'static str = "update_aks_cluster";
    pub const DESCRIPTION: &'static str = "Update an AKS cluster properties.";

    pub fn build_command(params: &ClusterUpdateParams, config: &Config) -> CommandSpec {
        let mut spec = az(config)
            .args(["aks", "update"])
            .flag("--resource-group", &params.resource_group_name)
            .flag("--name", &params.cluster_name)
            .switch("--yes")
            // The update command may otherwise ask for confirmation on
            // certain property changes.
            .env("AZURE_CORE_NO_PROMPT", "true")
            .context("updating AKS cluster");

        spec = spec.flag_opt("--kubernetes-version", params.kubernetes_version.as_deref());
        spec = spec.flag_opt("--auto-upgrade-channel", params.auto_upgrade_channel.as_deref());
        if let Some(public_ip) = params.enable_node_public_ip {
            spec = spec.flag("--enable-node-public-ip", public_ip);
        }
        spec.flag_opt("--tags", params.tags.as_deref())
    }

    pub async fn execute(
        params: &ClusterUpdateParams,
        config: &Config,
    ) -> Result<String, ToolError> {
        let spec = Self::build_command(params, config);
        exec::run(&spec).await?;
        Ok(format!(
            "AKS cluster '{}' update initiated.",
            params.cluster_name
        ))
    }

    pub fn to_tool() -> Tool {
        tool_model::<ClusterUpdateParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        text_route(
            Self::to_tool(),
            config,
            |params: ClusterUpdateParams, config: Arc<Config>| async move {
                Self::execute(&params, &config).await
            },
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
