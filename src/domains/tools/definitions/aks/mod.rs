//! Azure AKS tool definitions.
//!
//! Thin, typed wrappers around `az aks` subcommands. Every tool builds a
//! deterministic command spec from its parameters, runs it through the
//! process invoker, and formats the result (or passes raw output through).

pub mod addons;
pub mod cluster;
pub mod credentials;
pub mod diagnostics;
pub mod maintenance;
pub mod nodepool;
pub mod versions;

pub use addons::{DisableAddonsTool, EnableAddonsTool};
pub use cluster::{
    ClusterCreateTool, ClusterDeleteTool, ClusterListTool, ClusterScaleTool, ClusterShowTool,
    ClusterStartTool, ClusterStopTool, ClusterUpdateTool, ClusterUpgradeTool,
};
pub use credentials::{
    GetAdminCredentialsTool, GetCredentialsTool, InstallCliTool, RotateCertsTool,
};
pub use diagnostics::{CheckAcrTool, CommandInvokeTool};
pub use maintenance::{MaintenanceCreateTool, MaintenanceDeleteTool, MaintenanceListTool};
pub use nodepool::{
    NodepoolAddTool, NodepoolDeleteTool, NodepoolListTool, NodepoolScaleTool, NodepoolShowTool,
    NodepoolUpdateTool, NodepoolUpgradeTool,
};
pub use versions::{GetVersionsTool, UpgradeProfileTool};

use crate::core::config::Config;
use crate::domains::tools::exec::CommandSpec;

/// Remediation hint shown when the Azure CLI binary is missing.
pub(crate) const AZ_INSTALL_HINT: &str =
    "Please install the Azure CLI first: https://learn.microsoft.com/cli/azure/install-azure-cli";

/// Start a command spec for the configured Azure CLI binary.
pub(crate) fn az(config: &Config) -> CommandSpec {
    CommandSpec::new(&config.azure.program, "Azure CLI", AZ_INSTALL_HINT)
}
