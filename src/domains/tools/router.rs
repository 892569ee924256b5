//! Tool Router - builds the rmcp ToolRouter from the definitions catalog.
//!
//! `build_tool_router` is the single registration path for every tool. It is
//! invoked once from `McpServer::new`; the resulting router is immutable for
//! the process lifetime and shared by every transport.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use crate::core::config::Config;

use super::definitions::{
    AlertsTool, AnalyzeClusterTool, CheckAcrTool, ClusterCreateTool, ClusterDeleteTool,
    ClusterListTool, ClusterScaleTool, ClusterShowTool, ClusterStartTool, ClusterStopTool,
    ClusterUpdateTool, ClusterUpgradeTool, CommandInvokeTool, ConfigureAuthTool,
    DisableAddonsTool, EnableAddonsTool, ForecastTool, GetAdminCredentialsTool,
    GetCredentialsTool, GetVersionsTool, InstallCliTool, ListFiltersTool, MaintenanceCreateTool,
    MaintenanceDeleteTool, MaintenanceListTool, NodepoolAddTool, NodepoolDeleteTool,
    NodepoolListTool, NodepoolScaleTool, NodepoolShowTool, NodepoolUpdateTool,
    NodepoolUpgradeTool, RotateCertsTool, UpgradeProfileTool,
};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(config: Arc<Config>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        // Cluster lifecycle
        .with_route(ClusterListTool::create_route(config.clone()))
        .with_route(ClusterShowTool::create_route(config.clone()))
        .with_route(ClusterCreateTool::create_route(config.clone()))
        .with_route(ClusterDeleteTool::create_route(config.clone()))
        .with_route(ClusterStartTool::create_route(config.clone()))
        .with_route(ClusterStopTool::create_route(config.clone()))
        .with_route(ClusterScaleTool::create_route(config.clone()))
        .with_route(ClusterUpgradeTool::create_route(config.clone()))
        .with_route(ClusterUpdateTool::create_route(config.clone()))
        // Node pools
        .with_route(NodepoolListTool::create_route(config.clone()))
        .with_route(NodepoolShowTool::create_route(config.clone()))
        .with_route(NodepoolAddTool::create_route(config.clone()))
        .with_route(NodepoolDeleteTool::create_route(config.clone()))
        .with_route(NodepoolScaleTool::create_route(config.clone()))
        .with_route(NodepoolUpgradeTool::create_route(config.clone()))
        .with_route(NodepoolUpdateTool::create_route(config.clone()))
        // Credentials
        .with_route(GetCredentialsTool::create_route(config.clone()))
        .with_route(GetAdminCredentialsTool::create_route(config.clone()))
        .with_route(RotateCertsTool::create_route(config.clone()))
        .with_route(InstallCliTool::create_route(config.clone()))
        // Add-ons
        .with_route(EnableAddonsTool::create_route(config.clone()))
        .with_route(DisableAddonsTool::create_route(config.clone()))
        // Maintenance windows
        .with_route(MaintenanceCreateTool::create_route(config.clone()))
        .with_route(MaintenanceListTool::create_route(config.clone()))
        .with_route(MaintenanceDeleteTool::create_route(config.clone()))
        // Versions and diagnostics
        .with_route(GetVersionsTool::create_route(config.clone()))
        .with_route(UpgradeProfileTool::create_route(config.clone()))
        .with_route(CheckAcrTool::create_route(config.clone()))
        .with_route(CommandInvokeTool::create_route(config.clone()))
        // k8sgpt analysis
        .with_route(AnalyzeClusterTool::create_route(config.clone()))
        .with_route(ConfigureAuthTool::create_route(config.clone()))
        .with_route(ListFiltersTool::create_route(config.clone()))
        // Weather
        .with_route(AlertsTool::create_route(config.clone()))
        .with_route(ForecastTool::create_route(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct TestServer {}

    fn test_config() -> Arc<Config> {
        Arc::new(Config::default())
    }

    #[test]
    fn test_build_router_registers_every_tool() {
        let router: ToolRouter<TestServer> = build_tool_router(test_config());
        let tools = router.list_all();
        assert_eq!(tools.len(), 34);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        for expected in [
            "get_aks_clusters",
            "show_aks_cluster",
            "create_aks_cluster",
            "delete_aks_cluster",
            "start_aks_cluster",
            "stop_aks_cluster",
            "scale_aks_cluster",
            "upgrade_aks_cluster",
            "update_aks_cluster",
            "get_aks_nodepool_list",
            "aks_nodepool_show",
            "add_aks_nodepool",
            "delete_aks_nodepool",
            "aks_nodepool_scale",
            "aks_nodepool_upgrade",
            "aks_nodepool_update",
            "set_aks_credentials",
            "get_aks_credentials_admin",
            "rotate_aks_certs",
            "install_aks_cli",
            "enable_aks_addons",
            "disable_aks_addons",
            "create_aks_maintenance_config",
            "list_aks_maintenance_configs",
            "delete_aks_maintenance_config",
            "get_aks_versions",
            "get_aks_upgrade_profile",
            "check_aks_acr",
            "aks_command_invoke",
            "analyze_k8s_cluster",
            "k8sgpt_configure_auth",
            "k8sgpt_list_filters",
            "get_alerts",
            "get_forecast",
        ] {
            assert!(names.contains(&expected), "missing tool: {expected}");
        }
    }

    #[test]
    fn test_no_duplicate_registrations() {
        let router: ToolRouter<TestServer> = build_tool_router(test_config());
        let tools = router.list_all();
        let unique: HashSet<_> = tools.iter().map(|t| t.name.as_ref().to_string()).collect();
        assert_eq!(unique.len(), tools.len());
    }

    #[test]
    fn test_every_tool_has_a_description() {
        let router: ToolRouter<TestServer> = build_tool_router(test_config());
        for tool in router.list_all() {
            let description = tool.description.as_deref().unwrap_or("");
            assert!(!description.is_empty(), "tool {} lacks a description", tool.name);
        }
    }
}
