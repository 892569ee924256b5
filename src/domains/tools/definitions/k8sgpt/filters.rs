//! Filter discovery tool.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRoute;
use rmcp::model::Tool;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::core::config::Config;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::exec::{self, CommandSpec};

use super::super::common::{text_route, tool_model};
use super::k8sgpt;

/// `k8sgpt_list_filters` takes no parameters.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListFiltersParams {}

/// Lists the resource filters k8sgpt can analyze.
pub struct ListFiltersTool;

impl ListFiltersTool {
    pub const NAME: &'static str = "k8sgpt_list_filters";
    pub const DESCRIPTION: &'static str = "List available k8sgpt analysis filters.";

    pub fn build_command(config: &Config) -> CommandSpec {
        k8sgpt(config).arg("filters").context("listing k8sgpt filters")
    }

    pub async fn execute(config: &Config) -> Result<String, ToolError> {
        let spec = Self::build_command(config);
        exec::run_text(&spec).await
    }

    pub fn to_tool() -> Tool {
        tool_model::<ListFiltersParams>(Self::NAME, Self::DESCRIPTION)
    }

    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        text_route(
            Self::to_tool(),
            config,
            |_params: ListFiltersParams, config: Arc<Config>| async move {
                Self::execute(&config).await
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_tokens() {
        let spec = ListFiltersTool::build_command(&Config::default());
        assert_eq!(spec.tokens(), vec!["k8sgpt", "filters"]);
    }
}
