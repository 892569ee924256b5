//! Tool-specific error types.
//!
//! Every handler returns `Result<String, ToolError>` internally; the error
//! is rendered into the outward plain-text contract only at the route
//! boundary (see `definitions::common::into_call_result`). Nothing below the
//! boundary panics or propagates past it.

use thiserror::Error;

/// Errors that can occur during tool operations.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The external binary is absent from the execution path.
    #[error("Error: {program} is not installed. {hint}")]
    NotInstalled { program: String, hint: String },

    /// The external command exited nonzero. `detail` carries the diagnostic
    /// stream (stderr, falling back to stdout when stderr is empty).
    #[error("Error {context}: {detail}")]
    Process { context: String, detail: String },

    /// Output that was expected to be structured could not be parsed.
    #[error("Error parsing {what}")]
    Parse { what: String },

    /// A precondition enforced by the wrapper itself, caught before any
    /// external process is spawned.
    #[error("Error: {0}")]
    Validation(String),

    /// Catch-all for anything not anticipated.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl ToolError {
    /// Create a "not installed" error with a remediation hint.
    pub fn not_installed(program: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::NotInstalled {
            program: program.into(),
            hint: hint.into(),
        }
    }

    /// Create a process-failure error.
    pub fn process(context: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Process {
            context: context.into(),
            detail: detail.into(),
        }
    }

    /// Create a parse-failure error.
    pub fn parse(what: impl Into<String>) -> Self {
        Self::Parse { what: what.into() }
    }

    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an "unexpected" error.
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::Unexpected(msg.into())
    }

    /// Stable short name of the error kind, for logs and tests.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotInstalled { .. } => "not_installed",
            Self::Process { .. } => "process",
            Self::Parse { .. } => "parse",
            Self::Validation(_) => "validation",
            Self::Unexpected(_) => "unexpected",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_installed_message_includes_hint() {
        let err = ToolError::not_installed("k8sgpt", "Please install it first with 'brew install k8sgpt'");
        let msg = err.to_string();
        assert!(msg.starts_with("Error: k8sgpt is not installed."));
        assert!(msg.contains("brew install k8sgpt"));
    }

    #[test]
    fn test_process_message_carries_context_and_detail() {
        let err = ToolError::process("creating AKS cluster", "quota exceeded");
        assert_eq!(err.to_string(), "Error creating AKS cluster: quota exceeded");
    }

    #[test]
    fn test_parse_message_has_no_detail() {
        let err = ToolError::parse("Azure CLI output");
        assert_eq!(err.to_string(), "Error parsing Azure CLI output");
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ToolError::validation("x").kind(), "validation");
        assert_eq!(ToolError::unexpected("x").kind(), "unexpected");
    }
}
