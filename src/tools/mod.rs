//! Filesystem tools for agent tool calls.
//!
//! This module provides the pieces an agent's dispatch layer needs to offer
//! sandboxed file access:
//!
//! - **Security**: [`PathValidator`](security::PathValidator), the access
//!   decision for every requested path
//! - **Definitions**: tool descriptors, the per-call context, and the
//!   uniform result object
//! - **Built-ins**: `read_file`, `write_file` and `list_dir`, plus the
//!   [`FilesystemTools`] registry
//!
//! ## Call Flow
//!
//! ```text
//! dispatch layer
//!      |
//!      | execute(ctx, args)
//!      v
//! +-------------------+     validate(path)     +-----------------+
//! |   Tool handler    | ---------------------> |  PathValidator  |
//! | read/write/list   | <--------------------- |                 |
//! +-------------------+   abs path | denial    +-----------------+
//!      |
//!      | allowed: tokio::fs call
//!      v
//!  ToolResult (success | silent | error)
//! ```

pub mod builtins;
pub mod definition;
pub mod error;
pub mod security;

// Re-exports
pub use builtins::{FilesystemTools, ListDirTool, ReadFileTool, WriteFileTool};
pub use definition::{
    BoxedToolExecutor, ToolContext, ToolDefinition, ToolExecutionFuture, ToolExecutorTrait,
    ToolResult,
};
pub use error::{ToolError, ToolErrorKind};
