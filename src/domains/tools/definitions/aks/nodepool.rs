//! Node-pool lifecycle tools.
//!
//! Wrappers around `az aks nodepool` subcommands. Node-pool commands address
//! their cluster with `--cluster-name` and the pool itself with `--name`.

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
use crate::domains::tools::format::{field_text, parse_json, render_nested_blocks, value_text};

use super::super::common::{text_route, tool_model};
use super::az;

// ============================================================================
// get_aks_nodepool_list
// ============================================================================

/// Parameters identifying a cluster whose pools are listed.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct NodepoolListParams {
    /// Name of the resource group.
    pub resource_group_name: String,

    /// Name of the AKS cluster.
    pub cluster_name: String,
}

/// Lists the node pools of an AKS cluster.
pub struct NodepoolListTool;

impl NodepoolListTool {
    pub const NAME: &'static str = "get_aks_nodepool_list";
    pub const DESCRIPTION: &'static str = "List node pools in an AKS cluster.";

    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("Name", "name"),
        ("Mode", "mode"),
        ("VM Size", "vmSize"),
        ("Node Count", "count"),
        ("OS", "osType"),
        ("Kubernetes Version", "orchestratorVersion"),
        ("Status", "provisioningState"),
    ];

    pub fn build_command(params: &NodepoolListParams, config: &Config) -> CommandSpec {
        az(config)
            .args(["aks", "nodepool", "list"])
            .flag("--resource-group", &params.resource_group_name)
            .flag("--cluster-name", &params.cluster_name)
            .context("listing node pools")
    }

    pub async fn execute(
        params: &NodepoolListParams,
        config: &Config,
    ) -> Result<String, ToolError> {
        let spec = Self::build_command(params, config);
        let stdout = exec::run_text(&spec).await?;
        let pools = parse_json(&stdout, "Azure CLI output")?;
        let records = pools.as_array().map(Vec::as_slice).unwrap_or_default();
        Ok(Self::format_pools(&params.cluster_name, records))
    }

    fn format_pools(cluster_name: &str, pools: &[Value]) -> String {
        if pools.is_empty() {
            return format!("No node pools found in AKS cluster '{cluster_name}'.");
        }
        format!(
            "Node pools in AKS cluster '{cluster_name}':\n{}",
            render_nested_blocks(pools, Self::FIELDS)
        )
    }

    pub fn to_tool() -> Tool {
        tool_model::<NodepoolListParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        text_route(
            Self::to_tool(),
            config,
            |params: NodepoolListParams, config: Arc<Config>| async move {
                Self::execute(&params, &config).await
            },
        )
    }
}

// ============================================================================
// aks_nodepool_show
// ============================================================================

/// Parameters identifying one node pool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct NodepoolShowParams {
    /// Name of the resource group.
    pub resource_group_name: String,

    /// Name of the AKS cluster.
    pub cluster_name: String,

    /// Name of the node pool.
    pub nodepool_name: String,
}

/// Shows the details of a node pool, including labels and taints when set.
pub struct NodepoolShowTool;

impl NodepoolShowTool {
    pub const NAME: &'static str = "aks_nodepool_show";
    pub const DESCRIPTION: &'static str = "Show details of a node pool in an AKS cluster.";

    pub fn build_command(params: &NodepoolShowParams, config: &Config) -> CommandSpec {
        az(config)
            .args(["aks", "nodepool", "show"])
            .flag("--resource-group", &params.resource_group_name)
            .flag("--cluster-name", &params.cluster_name)
            .flag("--name", &params.nodepool_name)
            .context("getting node pool details")
    }

    pub async fn execute(
        params: &NodepoolShowParams,
        config: &Config,
    ) -> Result<String, ToolError> {
        let spec = Self::build_command(params, config);
        let stdout = exec::run_text(&spec).await?;
        let pool = parse_json(&stdout, "node pool information")?;
        Ok(Self::format_pool(&params.nodepool_name, &pool))
    }

    fn format_pool(nodepool_name: &str, pool: &Value) -> String {
        let mut lines = vec![format!("Node pool '{nodepool_name}' details:")];
        lines.push(format!("Mode: {}", field_text(pool, "mode")));
        lines.push(format!("VM Size: {}", field_text(pool, "vmSize")));
        lines.push(format!("Node Count: {}", field_text(pool, "count")));
        lines.push(format!("OS Type: {}", field_text(pool, "osType")));
        lines.push(format!(
            "Kubernetes Version: {}",
            field_text(pool, "orchestratorVersion")
        ));
        lines.push(format!("Status: {}", field_text(pool, "provisioningState")));
        lines.push(format!("Max Pods: {}", field_text(pool, "maxPods")));

        // Labels and taints only show up when present and non-empty.
        if let Some(labels) = pool.get("nodeLabels").and_then(Value::as_object)
            && !labels.is_empty()
        {
            lines.push("Labels:".to_string());
            for (key, value) in labels {
                lines.push(format!("  {}: {}", key, value_text(value)));
            }
        }

        if let Some(taints) = pool.get("nodeTaints").and_then(Value::as_array)
            && !taints.is_empty()
        {
            lines.push("Taints:".to_string());
            for taint in taints {
                lines.push(format!("  {}", value_text(taint)));
            }
        }

        lines.join("\n")
    }

    pub fn to_tool() -> Tool {
        tool_model::<NodepoolShowParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        text_route(
            Self::to_tool(),
            config,
            |params: NodepoolShowParams, config: Arc<Config>| async move {
                Self::execute(&params, &config).await
            },
        )
    }
}

// ============================================================================
// add_aks_nodepool
// ============================================================================

fn default_node_count() -> i64 {
    1
}

fn default_vm_size() -> String {
    "Standard_DS2_v2".to_string()
}

fn default_mode() -> String {
    "User".to_string()
}

/// Parameters for adding a node pool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct NodepoolAddParams {
    /// Name of the resource group.
    pub resource_group_name: String,

    /// Name of the AKS cluster.
    pub cluster_name: String,

    /// Name for the new node pool.
    pub nodepool_name: String,

    /// Number of nodes in the pool (default: 1).
    #[serde(default = "default_node_count")]
    pub node_count: i64,

    /// VM size for the nodes (default: Standard_DS2_v2).
    #[serde(default = "default_vm_size")]
    pub node_vm_size: String,

    /// Node pool mode (System or User, default: User).
    #[serde(default = "default_mode")]
    pub mode: String,
}

/// Adds a new node pool to an AKS cluster.
pub struct NodepoolAddTool;

impl NodepoolAddTool {
    pub const NAME: &'static str = "add_aks_nodepool";
    pub const DESCRIPTION: &'static str = "Add a new node pool to an AKS cluster.";

    pub fn build_command(params: &NodepoolAddParams, config: &Config) -> CommandSpec {
        az(config)
            .args(["aks", "nodepool", "add"])
            .flag("--resource-group", &params.resource_group_name)
            .flag("--cluster-name", &params.cluster_name)
            .flag("--name", &params.nodepool_name)
            .flag("--node-count", params.node_count)
            .flag("--node-vm-size", &params.node_vm_size)
            .flag("--mode", &params.mode)
            .context("adding node pool")
    }

    pub async fn execute(
        params: &NodepoolAddParams,
        config: &Config,
    ) -> Result<String, ToolError> {
        info!(
            "Adding node pool '{}' to cluster '{}'",
            params.nodepool_name, params.cluster_name
        );
        let spec = Self::build_command(params, config);
        exec::run(&spec).await?;
        Ok(format!(
            "Node pool '{}' added to AKS cluster '{}' successfully.",
            params.nodepool_name, params.cluster_name
        ))
    }

    pub fn to_tool() -> Tool {
        tool_model::<NodepoolAddParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        text_route(
            Self::to_tool(),
            config,
            |params: NodepoolAddParams, config: Arc<Config>| async move {
                Self::execute(&params, &config).await
            },
        )
    }
}

// ============================================================================
// delete_aks_nodepool
// ============================================================================

/// Parameters for deleting a node pool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct NodepoolDeleteParams {
    /// Name of the resource group.
    pub resource_group_name: String,

    /// Name of the AKS cluster.
    pub cluster_name: String,

    /// Name of the node pool to delete.
    pub nodepool_name: String,
}

/// Deletes a node pool from an AKS cluster.
pub struct NodepoolDeleteTool;

impl NodepoolDeleteTool {
    pub const NAME: &'static str = "delete_aks_nodepool";
    pub const DESCRIPTION: &'static str = "Delete a node pool from an AKS cluster.";

    pub fn build_command(params: &NodepoolDeleteParams, config: &Config) -> CommandSpec {
        az(config)
            .args(["aks", "nodepool", "delete"])
            .flag("--resource-group", &params.resource_group_name)
            .flag("--cluster-name", &params.cluster_name)
            .flag("--name", &params.nodepool_name)
            .context("deleting node pool")
    }

    pub async fn execute(
        params: &NodepoolDeleteParams,
        config: &Config,
    ) -> Result<String, ToolError> {
        let spec = Self::build_command(params, config);
        exec::run(&spec).await?;
        Ok(format!(
            "Node pool '{}' deleted from AKS cluster '{}' successfully.",
            params.nodepool_name, params.cluster_name
        ))
    }

    pub fn to_tool() -> Tool {
        tool_model::<NodepoolDeleteParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        text_route(
            Self::to_tool(),
            config,
            |params: NodepoolDeleteParams, config: Arc<Config>| async move {
                Self::execute(&params, &config).await
            },
        )
    }
}

// ============================================================================
// aks_nodepool_scale
// ============================================================================

/// Parameters for scaling a node pool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct NodepoolScaleParams {
    /// Name of the resource group.
    pub resource_group_name: String,

    /// Name of the AKS cluster.
    pub cluster_name: String,

    /// Name of the node pool.
    pub nodepool_name: String,

    /// New node count.
    pub node_count: i64,
}

/// Changes the node count of a node pool.
pub struct NodepoolScaleTool;

impl NodepoolScaleTool {
    pub const NAME: &'static str = "aks_nodepool_scale";
    pub const DESCRIPTION: &'static str = "Scale the node count of a node pool in an AKS cluster.";

    pub fn build_command(params: &NodepoolScaleParams, config: &Config) -> CommandSpec {
        az(config)
            .args(["aks", "nodepool", "scale"])
            .flag("--resource-group", &params.resource_group_name)
            .flag("--cluster-name", &params.cluster_name)
            .flag("--name", &params.nodepool_name)
            .flag("--node-count", params.node_count)
            .context("scaling node pool")
    }

    pub async fn execute(
        params: &NodepoolScaleParams,
        config: &Config,
    ) -> Result<String, ToolError> {
        let spec = Self::build_command(params, config);
        exec::run(&spec).await?;
        Ok(format!(
            "Node pool '{}' in cluster '{}' scaled to {} nodes.",
            params.nodepool_name, params.cluster_name, params.node_count
        ))
    }

    pub fn to_tool() -> Tool {
        tool_model::<NodepoolScaleParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        text_route(
            Self::to_tool(),
            config,
            |params: NodepoolScaleParams, config: Arc<Config>| async move {
                Self::execute(&params, &config).await
            },
        )
    }
}

// ============================================================================
// aks_nodepool_upgrade
// ============================================================================

/// Parameters for upgrading a node pool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct NodepoolUpgradeParams {
    /// Name of the resource group.
    pub resource_group_name: String,

    /// Name of the AKS cluster.
    pub cluster_name: String,

    /// Name of the node pool to upgrade.
    pub nodepool_name: String,

    /// Target Kubernetes version.
    pub kubernetes_version: String,
}

/// Upgrades a node pool to a specific Kubernetes version.
pub struct NodepoolUpgradeTool;

impl NodepoolUpgradeTool {
    pub const NAME: &'static str = "aks_nodepool_upgrade";
    pub const DESCRIPTION: &'static str = "Upgrade a node pool to a specific Kubernetes version.";

    pub fn build_command(params: &NodepoolUpgradeParams, config: &Config) -> CommandSpec {
        az(config)
            .args(["aks", "nodepool", "upgrade"])
            .flag("--resource-group", &params.resource_group_name)
            .flag("--cluster-name", &params.cluster_name)
            .flag("--name", &params.nodepool_name)
            .flag("--kubernetes-version", &params.kubernetes_version)
            .context("upgrading node pool")
    }

    pub async fn execute(
        params: &NodepoolUpgradeParams,
        config: &Config,
    ) -> Result<String, ToolError> {
        let spec = Self::build_command(params, config);
        exec::run(&spec).await?;
        Ok(format!(
            "Node pool '{}' upgrade to version {} initiated.",
            params.nodepool_name, params.kubernetes_version
        ))
    }

    pub fn to_tool() -> Tool {
        tool_model::<NodepoolUpgradeParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        text_route(
            Self::to_tool(),
            config,
            |params: NodepoolUpgradeParams, config: Arc<Config>| async move {
                Self::execute(&params, &config).await
            },
        )
    }
}

// ============================================================================
// aks_nodepool_update
// ============================================================================

/// Parameters for updating node pool properties. All property fields are
/// optional; enabling the cluster autoscaler additionally requires both
/// `min_count` and `max_count`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct NodepoolUpdateParams {
    /// Name of the resource group.
    pub resource_group_name: String,

    /// Name of the AKS cluster.
    pub cluster_name: String,

    /// Name of the node pool.
    pub nodepool_name: String,

    /// Maximum number of pods per node (optional).
    #[serde(default)]
    pub max_pods: Option<i64>,

    /// Enable or disable nodes having public IPs (optional).
    #[serde(default)]
    pub enable_node_public_ip: Option<bool>,

    /// Comma-separated labels to apply to nodes (optional).
    #[serde(default)]
    pub labels: Option<String>,

    /// Space-separated tags in 'key[=value]' format for the node pool (optional).
    #[serde(default)]
    pub tags: Option<String>,

    /// Disable cluster autoscaler for this node pool (optional).
    #[serde(default)]
    pub disable_cluster_autoscaler: Option<bool>,

    /// Enable cluster autoscaler for this node pool (optional).
    #[serde(default)]
    pub enable_cluster_autoscaler: Option<bool>,

    /// Minimum number of nodes for auto-scaling (required when enabling cluster autoscaler).
    #[serde(default)]
    pub min_count: Option<i64>,

    /// Maximum number of nodes for auto-scaling (required when enabling cluster autoscaler).
    #[serde(default)]
    pub max_count: Option<i64>,
}

/// Updates mutable properties of a node pool.
pub struct NodepoolUpdateTool;

impl NodepoolUpdateTool {
    pub const NAME: &'static str = "aks_nodepool_update";
    pub const DESCRIPTION: &'static str = "Update a node pool with new properties. \
        Enabling the cluster autoscaler requires both min_count and max_count.";

    /// Build the update command. Returns a validation error, before anything
    /// is constructed, when the autoscaler is being enabled without bounds.
    pub fn build_command(
        params: &NodepoolUpdateParams,
        config: &Config,
    ) -> Result<CommandSpec, ToolError> {
        let autoscaler_bounds = if params.enable_cluster_autoscaler.unwrap_or(false) {
            let (Some(min), Some(max)) = (params.min_count, params.max_count) else {
                return Err(ToolError::validation(
                    "min_count and max_count are required when enabling cluster autoscaler",
                ));
            };
            Some((min, max))
        } else {
            None
        };

        let mut spec = az(config)
            .args(["aks", "nodepool", "update"])
            .flag("--resource-group", &params.resource_group_name)
            .flag("--cluster-name", &params.cluster_name)
            .flag("--name", &params.nodepool_name)
            .switch("--yes")
            .context("updating node pool");

        spec = spec.flag_opt("--max-pods", params.max_pods);
        if let Some(public_ip) = params.enable_node_public_ip {
            spec = spec.flag("--enable-node-public-ip", public_ip);
        }
        spec = spec.flag_opt("--labels", params.labels.as_deref());
        spec = spec.flag_opt("--tags", params.tags.as_deref());
        spec = spec.switch_if(
            "--disable-cluster-autoscaler",
            params.disable_cluster_autoscaler.unwrap_or(false),
        );
        if let Some((min, max)) = autoscaler_bounds {
            spec = spec
                .switch("--enable-cluster-autoscaler")
                .flag("--min-count", min)
                .flag("--max-count", max);
        }

        Ok(spec)
    }

    pub async fn execute(
        params: &NodepoolUpdateParams,
        config: &Config,
    ) -> Result<String, ToolError> {
        let spec = Self::build_command(params, config)?;
        exec::run(&spec).await?;
        Ok(format!(
            "Node pool '{}' updated successfully.",
            params.nodepool_name
        ))
    }

    pub fn to_tool() -> Tool {
        tool_model::<NodepoolUpdateParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        text_route(
            Self::to_tool(),
            config,
            |params: NodepoolUpdateParams, config: Arc<Config>| async move {
                Self::execute(&params, &config).await
            },
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
