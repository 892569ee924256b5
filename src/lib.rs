//! AKS MCP Server Library
//!
//! This crate provides a Model Context Protocol (MCP) server that wraps
//! cluster-management command-line tools and a public weather API as typed,
//! remotely callable tools.
//!
//! # Architecture
//!
//! The server is organized into the following modules:
//!
//! - **core**: Core infrastructure including configuration, error handling, and the main server
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: MCP tools that can be executed by clients, grouped into
//!     AKS management, k8sgpt cluster analysis, and weather lookup families
//!
//! # Example
//!
//! ```rust,no_run
//! use aks_mcp_server::{core::McpServer, core::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config);
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
