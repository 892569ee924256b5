//! Shared plumbing for tool definitions.
//!
//! Every tool handler returns `Result<String, ToolError>`; the helpers here
//! publish the tool metadata and convert that internal outcome into the
//! outward text-only MCP contract at the route boundary. Individual tool
//! files never build `CallToolResult`s themselves.

use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Content, Tool},
};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::core::config::Config;
use crate::domains::tools::error::ToolError;

/// Create the Tool model (metadata) for a parameter type.
pub(crate) fn tool_model<P>(name: &'static str, description: &'static str) -> Tool
where
    P: JsonSchema + DeserializeOwned + Send + Sync + 'static,
{
    Tool {
        name: name.into(),
        description: Some(description.into()),
        input_schema: cached_schema_for_type::<P>(),
        annotations: None,
        output_schema: None,
        icons: None,
        meta: None,
        title: None,
    }
}

/// Project a tool outcome onto the text-only result channel.
///
/// Success text becomes success content; a `ToolError` is rendered to its
/// human-readable message and returned as error content. Either way the
/// caller receives a plain string.
pub(crate) fn into_call_result(outcome: Result<String, ToolError>) -> CallToolResult {
    match outcome {
        Ok(text) => CallToolResult::success(vec![Content::text(text)]),
        Err(e) => {
            warn!(kind = e.kind(), "tool call failed: {e}");
            CallToolResult::error(vec![Content::text(e.to_string())])
        }
    }
}

/// Build a `ToolRoute` for a handler that takes typed params plus the server
/// configuration and resolves to text.
pub(crate) fn text_route<S, P, F, Fut>(tool: Tool, config: Arc<Config>, handler: F) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
    P: DeserializeOwned + Send + 'static,
    F: Fn(P, Arc<Config>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<String, ToolError>> + Send + 'static,
{
    ToolRoute::new_dyn(tool, move |ctx: ToolCallContext<'_, S>| {
        let args = ctx.arguments.clone().unwrap_or_default();
        let config = config.clone();
        let call = serde_json::from_value::<P>(serde_json::Value::Object(args))
            .map(|params| handler(params, config));
        async move {
            match call {
                Ok(fut) => Ok(into_call_result(fut.await)),
                Err(e) => Err(McpError::invalid_params(e.to_string(), None)),
            }
        }
        .boxed()
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use rmcp::model::{CallToolResult, RawContent};

    /// Extract the text payload from a call result, for assertions.
    pub(crate) fn result_text(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::result_text;
    use super::*;

    #[test]
    fn test_success_projects_to_text() {
        let result = into_call_result(Ok("all good".to_string()));
        assert!(result.is_error.is_none() || !result.is_error.unwrap());
        assert_eq!(result_text(&result), "all good");
    }

    #[test]
    fn test_error_projects_to_message_string() {
        let err = ToolError::validation("min_count and max_count are required");
        let result = into_call_result(Err(err));
        assert!(result.is_error.unwrap_or(false));
        assert_eq!(
            result_text(&result),
            "Error: min_count and max_count are required"
        );
    }
}
