//! Tool definitions module.
//!
//! This module exports all available tool definitions, grouped by family.
//! Each tool declares its name, parameter schema, description and handler.

pub mod aks;
pub mod k8sgpt;
pub mod weather;

pub(crate) mod common;

pub use aks::{
    CheckAcrTool, ClusterCreateTool, ClusterDeleteTool, ClusterListTool, ClusterScaleTool,
    ClusterShowTool, ClusterStartTool, ClusterStopTool, ClusterUpdateTool, ClusterUpgradeTool,
    CommandInvokeTool, DisableAddonsTool, EnableAddonsTool, GetAdminCredentialsTool,
    GetCredentialsTool, GetVersionsTool, InstallCliTool, MaintenanceCreateTool,
    MaintenanceDeleteTool, MaintenanceListTool, NodepoolAddTool, NodepoolDeleteTool,
    NodepoolListTool, NodepoolScaleTool, NodepoolShowTool, NodepoolUpdateTool,
    NodepoolUpgradeTool, RotateCertsTool, UpgradeProfileTool,
};
pub use k8sgpt::{AnalyzeClusterTool, ConfigureAuthTool, ListFiltersTool};
pub use weather::{AlertsTool, ForecastTool};
