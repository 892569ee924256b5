//! Cluster analysis tool.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRoute;
use rmcp::model::Tool;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use crate::core::config::Config;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::exec::{self, CommandSpec};
use crate::domains::tools::format::pretty_json_or_raw;

use super::super::common::{text_route, tool_model};
use super::k8sgpt;

fn default_true() -> bool {
    true
}

fn default_output_format() -> String {
    "text".to_string()
}

/// Parameters controlling the analysis pass.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AnalyzeParams {
    /// Whether to provide detailed AI explanations of issues (default: true).
    #[serde(default = "default_true")]
    pub explain: bool,

    /// Filter analysis to a specific resource type (e.g., Pod, Service, Deployment).
    #[serde(default)]
    pub filter: Option<String>,

    /// Filter analysis to a specific namespace.
    #[serde(default)]
    pub namespace: Option<String>,

    /// Include official Kubernetes documentation references (default: false).
    #[serde(default)]
    pub with_doc: bool,

    /// Output format (text, json, yaml) (default: text).
    #[serde(default = "default_output_format")]
    pub output_format: String,

    /// Anonymize resource names in output (default: false).
    #[serde(default)]
    pub anonymize: bool,

    /// Specify which AI backend to use (default: system default).
    #[serde(default)]
    pub backend: Option<String>,
}

/// Runs a k8sgpt analysis pass against the current cluster context.
pub struct AnalyzeClusterTool;

impl AnalyzeClusterTool {
    pub const NAME: &'static str = "analyze_k8s_cluster";
    pub const DESCRIPTION: &'static str = "Analyze Kubernetes cluster issues using k8sgpt.";

    pub fn build_command(params: &AnalyzeParams, config: &Config) -> CommandSpec {
        let mut spec = k8sgpt(config).arg("analyze").context("executing k8sgpt");

        spec = spec.switch_if("--explain", params.explain);
        spec = spec.flag_opt("--filter", params.filter.as_deref());
        spec = spec.flag_opt("--namespace", params.namespace.as_deref());
        spec = spec.switch_if("--with-doc", params.with_doc);

        // Only the three formats k8sgpt understands are forwarded.
        let format = params.output_format.to_lowercase();
        if matches!(format.as_str(), "text" | "json" | "yaml") {
            spec = spec.flag("--output", &format);
        }

        spec = spec.switch_if("--anonymize", params.anonymize);
        spec.flag_opt("--backend", params.backend.as_deref())
    }

    pub async fn execute(params: &AnalyzeParams, config: &Config) -> Result<String, ToolError> {
        let spec = Self::build_command(params, config);
        info!("Executing k8sgpt command: {}", spec.tokens().join(" "));

        match exec::run_text(&spec).await {
            Ok(stdout) => {
                if params.output_format.to_lowercase() == "json" {
                    // Re-indent parseable JSON; fall back to raw output.
                    Ok(pretty_json_or_raw(&stdout))
                } else if stdout.is_empty() {
                    Ok("No issues found in the cluster.".to_string())
                } else {
                    Ok(stdout)
                }
            }
            Err(ToolError::Process { detail, .. })
                if detail.contains("authentication required") || detail.contains("auth") =>
            {
                Err(ToolError::validation(
                    "k8sgpt requires authentication setup. Please run 'k8sgpt auth add' to \
                     configure your AI provider.",
                ))
            }
            Err(e) => Err(e),
        }
    }

    pub fn to_tool() -> Tool {
        tool_model::<AnalyzeParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        text_route(
            Self::to_tool(),
            config,
            |params: AnalyzeParams, config: Arc<Config>| async move {
                Self::execute(&params, &config).await
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config::default()
    }

    #[test]
    fn test_analyze_defaults() {
        let params: AnalyzeParams = serde_json::from_str("{}").unwrap();
        assert!(params.explain);
        assert!(!params.with_doc);
        assert!(!params.anonymize);
        assert_eq!(params.output_format, "text");
    }

    #[test]
    fn test_analyze_default_tokens() {
        let params: AnalyzeParams = serde_json::from_str("{}").unwrap();
        let spec = AnalyzeClusterTool::build_command(&params, &test_config());
        assert_eq!(
            spec.tokens(),
            vec!["k8sgpt", "analyze", "--explain", "--output", "text"]
        );
    }

    #[test]
    fn test_analyze_all_flags() {
        let params = AnalyzeParams {
            explain: true,
            filter: Some("Pod".to_string()),
            namespace: Some("kube-system".to_string()),
            with_doc: true,
            output_format: "YAML".to_string(),
            anonymize: true,
            backend: Some("azureopenai".to_string()),
        };
        let spec = AnalyzeClusterTool::build_command(&params, &test_config());
        assert_eq!(
            spec.tokens(),
            vec![
                "k8sgpt",
                "analyze",
                "--explain",
                "--filter",
                "Pod",
                "--namespace",
                "kube-system",
                "--with-doc",
                "--output",
                "yaml",
                "--anonymize",
                "--backend",
                "azureopenai",
            ]
        );
    }

    #[test]
    fn test_analyze_unknown_format_not_forwarded() {
        let mut params: AnalyzeParams = serde_json::from_str("{}").unwrap();
        params.output_format = "xml".to_string();
        params.explain = false;
        let spec = AnalyzeClusterTool::build_command(&params, &test_config());
        assert_eq!(spec.tokens(), vec!["k8sgpt", "analyze"]);
    }
}
