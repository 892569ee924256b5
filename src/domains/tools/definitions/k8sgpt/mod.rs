//! k8sgpt cluster-analysis tool definitions.
//!
//! Wrappers around the `k8sgpt` CLI: cluster analysis, backend
//! authentication, and filter discovery.

pub mod analyze;
pub mod auth;
pub mod filters;

pub use analyze::AnalyzeClusterTool;
pub use auth::ConfigureAuthTool;
pub use filters::ListFiltersTool;

use crate::core::config::Config;
use crate::domains::tools::exec::CommandSpec;

/// Remediation hint shown when the k8sgpt binary is missing.
pub(crate) const K8SGPT_INSTALL_HINT: &str = "Please install it first with 'brew install \
    k8sgpt' or follow the installation guide at https://github.com/k8sgpt-ai/k8sgpt";

/// Start a command spec for the configured k8sgpt binary.
pub(crate) fn k8sgpt(config: &Config) -> CommandSpec {
    CommandSpec::new(&config.k8sgpt.program, "k8sgpt", K8SGPT_INSTALL_HINT)
}
