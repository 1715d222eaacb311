//! # Acton-FS-Guard: Sandboxed Filesystem Tools for Agents
//!
//! A filesystem access-control layer for agents whose file operations are
//! requested by an untrusted instruction stream, such as an LLM's tool calls.
//!
//! ## Architecture
//!
//! - **Path Validator**: Decides whether a requested path lies inside the
//!   workspace or an extra allowed root, following symlinks and tolerating
//!   path segments that do not exist yet
//! - **Tools**: `read_file`, `write_file` and `list_dir`, thin callers of the
//!   validator that report every failure as a uniform result object
//! - **Config**: TOML configuration injected into the tools at construction
//! - **Logging**: Optional daily-rotated file logs via `tracing`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use acton_fs_guard::prelude::*;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let validator = PathValidator::new("/home/agent/project");
//!     let tools = FilesystemTools::new(&validator);
//!
//!     let result = tools
//!         .execute("read_file", &ToolContext::new(), json!({"path": "../../etc/passwd"}))
//!         .await;
//!     assert!(result.is_error);
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod tools;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::FsGuardConfig;
    pub use crate::error::{FsGuardError, FsGuardErrorKind};
    pub use crate::logging::{LogLevel, LoggingConfig};
    pub use crate::tools::security::{validate_path, PathValidationError, PathValidator};
    pub use crate::tools::{
        FilesystemTools, ListDirTool, ReadFileTool, ToolContext, ToolDefinition, ToolError,
        ToolExecutorTrait, ToolResult, WriteFileTool,
    };
}
