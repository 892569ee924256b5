//! Kubernetes version queries.
//!
//! Region-wide available versions and per-cluster upgrade profiles.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRoute;
use rmcp::model::Tool;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use crate::core::config::Config;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::exec::{self, CommandSpec};
use crate::domains::tools::format::{field_text, parse_json, tag_suffix};

use super::super::common::{text_route, tool_model};
use super::az;

// ============================================================================
// get_aks_versions
// ============================================================================

/// Parameters for listing available Kubernetes versions.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct VersionsParams {
    /// Azure region to check for available versions (optional).
    #[serde(default)]
    pub location: Option<String>,
}

/// Lists the Kubernetes versions AKS can deploy.
pub struct GetVersionsTool;

impl GetVersionsTool {
    pub const NAME: &'static str = "get_aks_versions";
    pub const DESCRIPTION: &'static str = "Get available Kubernetes versions for AKS.";

    pub fn build_command(params: &VersionsParams, config: &Config) -> CommandSpec {
        az(config)
            .args(["aks", "get-versions"])
            .flag_opt("--location", params.location.as_deref())
            .context("getting AKS versions")
    }

    pub async fn execute(params: &VersionsParams, config: &Config) -> Result<String, ToolError> {
        let spec = Self::build_command(params, config);
        let stdout = exec::run_text(&spec).await?;
        let versions = parse_json(&stdout, "Azure CLI output")?;
        Ok(Self::format_versions(&versions))
    }

    fn format_versions(versions: &Value) -> String {
        let mut lines = vec!["Available Kubernetes versions:".to_string()];

        let orchestrators = versions
            .get("orchestrators")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        for orchestrator in orchestrators {
            let version = field_text(orchestrator, "orchestratorVersion");
            let mut tags = Vec::new();
            if orchestrator
                .get("default")
                .and_then(Value::as_bool)
                .unwrap_or(false)
            {
                tags.push("DEFAULT");
            }
            if orchestrator
                .get("isPreview")
                .and_then(Value::as_bool)
                .unwrap_or(false)
            {
                tags.push("PREVIEW");
            }
            lines.push(format!("- {}{}", version, tag_suffix(&tags)));
        }

        lines.join("\n")
    }

    pub fn to_tool() -> Tool {
        tool_model::<VersionsParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        text_route(
            Self::to_tool(),
            config,
            |params: VersionsParams, config: Arc<Config>| async move {
                Self::execute(&params, &config).await
            },
        )
    }
}

// ============================================================================
// get_aks_upgrade_profile
// ============================================================================

/// Parameters identifying the cluster whose upgrade profile is queried.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpgradeProfileParams {
    /// Name of the resource group.
    pub resource_group_name: String,

    /// Name of the AKS cluster.
    pub cluster_name: String,
}

/// Shows the versions a cluster's control plane can upgrade to.
pub struct UpgradeProfileTool;

impl UpgradeProfileTool {
    pub const NAME: &'static str = "get_aks_upgrade_profile";
    pub const DESCRIPTION: &'static str = "Get available upgrade versions for an AKS cluster.";

    pub fn build_command(params: &UpgradeProfileParams, config: &Config) -> CommandSpec {
        az(config)
            .args(["aks", "get-upgrades"])
            .flag("--resource-group", &params.resource_group_name)
            .flag("--name", &params.cluster_name)
            .context("getting upgrade profile")
    }

    pub async fn execute(
        params: &UpgradeProfileParams,
        config: &Config,
    ) -> Result<String, ToolError> {
        let spec = Self::build_command(params, config);
        let stdout = exec::run_text(&spec).await?;
        let profile = parse_json(&stdout, "upgrade information")?;
        Ok(Self::format_profile(&params.cluster_name, &profile))
    }

    fn format_profile(cluster_name: &str, profile: &Value) -> String {
        let control_plane = profile.get("controlPlaneProfile").cloned().unwrap_or_default();
        let current_version = match control_plane.get("kubernetesVersion") {
            Some(Value::String(v)) => v.clone(),
            _ => "Unknown".to_string(),
        };

        let mut lines = vec![
            format!("AKS cluster '{cluster_name}' upgrade profile:"),
            format!("Current Kubernetes version: {current_version}"),
        ];

        let upgrades = control_plane
            .get("upgrades")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        if upgrades.is_empty() {
            lines.push("No upgrades available.".to_string());
        } else {
            lines.push("Available upgrade versions:".to_string());
            for upgrade in upgrades {
                let version = match upgrade.get("kubernetesVersion") {
                    Some(Value::String(v)) => v.clone(),
                    _ => "Unknown".to_string(),
                };
                let is_preview = upgrade
                    .get("isPreview")
                    .and_then(Value::as_bool)
                    .unwrap_or(false);
                let tags: &[&str] = if is_preview { &["PREVIEW"] } else { &[] };
                lines.push(format!("- {}{}", version, tag_suffix(tags)));
            }
        }

        lines.join("\n")
    }

    pub fn to_tool() -> Tool {
        tool_model::<UpgradeProfileParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        text_route(
            Self::to_tool(),
            config,
            |params: UpgradeProfileParams, config: Arc<Config>| async move {
                Self::execute(&params, &config).await
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
    use serde_json::json;

    #[test]
    fn test_versions_required_only_omits_location() {
        let params: VersionsParams = serde_json::from_str("{}").unwrap();
        let spec = GetVersionsTool::build_command(&params, &Config::default());
        assert_eq!(spec.tokens(), vec!["az", "aks", "get-versions"]);
    }

    #[test]
    fn test_versions_with_location() {
        let params = VersionsParams {
            location: Some("eastus".to_string()),
        };
        let tokens = GetVersionsTool::build_command(&params, &Config::default()).tokens();
        assert!(tokens.ends_with(&["--location".to_string(), "eastus".to_string()]));
    }

    #[test]
    fn test_format_versions_tag_list() {
        let versions = json!({
            "orchestrators": [
                {"orchestratorVersion": "1.28.5", "default": true, "isPreview": false},
                {"orchestratorVersion": "1.29.2"},
                {"orchestratorVersion": "1.30.0", "default": true, "isPreview": true}
            ]
        });
        let text = GetVersionsTool::format_versions(&versions);
        assert_eq!(
            text,
            "Available Kubernetes versions:\n\
             - 1.28.5 (DEFAULT)\n\
             - 1.29.2\n\
             - 1.30.0 (DEFAULT, PREVIEW)"
        );
    }

    #[test]
    fn test_format_versions_no_orchestrators_keeps_header() {
        let text = GetVersionsTool::format_versions(&json!({}));
        assert_eq!(text, "Available Kubernetes versions:");
    }

    #[test]
    fn test_format_profile_with_upgrades() {
        let profile = json!({
            "controlPlaneProfile": {
                "kubernetesVersion": "1.28.5",
                "upgrades": [
                    {"kubernetesVersion": "1.29.2", "isPreview": false},
                    {"kubernetesVersion": "1.30.0", "isPreview": true}
                ]
            }
        });
        let text = UpgradeProfileTool::format_profile("aks1", &profile);
        assert_eq!(
            text,
            "AKS cluster 'aks1' upgrade profile:\n\
             Current Kubernetes version: 1.28.5\n\
             Available upgrade versions:\n\
             - 1.29.2\n\
             - 1.30.0 (PREVIEW)"
        );
    }

    #[test]
    fn test_format_profile_without_upgrades() {
        let profile = json!({
            "controlPlaneProfile": {"kubernetesVersion": "1.30.0", "upgrades": []}
        });
        let text = UpgradeProfileTool::format_profile("aks1", &profile);
        assert!(text.ends_with("No upgrades available."));
    }

    #[test]
    fn test_format_profile_is_deterministic() {
        let profile = json!({
            "controlPlaneProfile": {"kubernetesVersion": "1.30.0", "upgrades": []}
        });
        assert_eq!(
            UpgradeProfileTool::format_profile("aks1", &profile),
            UpgradeProfileTool::format_profile("aks1", &profile)
        );
    }
}
