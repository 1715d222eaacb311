//! Built-in filesystem tools.
//!
//! Each tool is a thin caller of the path validator: it extracts its typed
//! arguments, validates the path, and only then touches the filesystem.
//!
//! ## Available Tools
//!
//! - **read_file**: Read the contents of a file
//! - **write_file**: Write content to a file, creating parent directories
//! - **list_dir**: List files and directories in a path
//!
//! ## Usage
//!
//! ```rust,ignore
//! use acton_fs_guard::config;
//! use acton_fs_guard::tools::{FilesystemTools, ToolContext};
//! use serde_json::json;
//!
//! let config = config::load()?;
//! let tools = FilesystemTools::from_config(&config);
//!
//! let result = tools
//!     .execute("read_file", &ToolContext::new(), json!({"path": "README.md"}))
//!     .await;
//! ```

mod list_dir;
mod read_file;
mod write_file;

pub use list_dir::ListDirTool;
pub use read_file::ReadFileTool;
pub use write_file::WriteFileTool;

use crate::config::FsGuardConfig;
use crate::tools::security::PathValidator;
use crate::tools::{BoxedToolExecutor, ToolContext, ToolDefinition, ToolError, ToolResult};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Deserializes a tool's typed arguments, mapping failures to
/// [`ToolError::invalid_argument`].
pub(crate) fn parse_args<T: DeserializeOwned>(tool_name: &str, args: Value) -> Result<T, ToolError> {
    serde_json::from_value(args)
        .map_err(|e| ToolError::invalid_argument(tool_name, format!("invalid arguments: {e}")))
}

/// Registry of the filesystem tools, all sharing one validator
/// configuration.
#[derive(Debug, Default, Clone)]
pub struct FilesystemTools {
    /// Tool executors by name
    executors: BTreeMap<String, Arc<BoxedToolExecutor>>,
}

impl FilesystemTools {
    /// Creates a registry with every filesystem tool using `validator`.
    #[must_use]
    pub fn new(validator: &PathValidator) -> Self {
        let mut registry = Self::default();

        registry.register(Box::new(ReadFileTool::new(validator.clone())));
        registry.register(Box::new(WriteFileTool::new(validator.clone())));
        registry.register(Box::new(ListDirTool::new(validator.clone())));

        registry
    }

    /// Creates a registry from loaded configuration.
    #[must_use]
    pub fn from_config(config: &FsGuardConfig) -> Self {
        Self::new(&config.validator())
    }

    /// Creates a registry with only the named tools.
    ///
    /// # Errors
    ///
    /// Returns a not found error for the first unknown tool name.
    pub fn select(validator: &PathValidator, tools: &[&str]) -> Result<Self, ToolError> {
        let all = Self::new(validator);
        let mut registry = Self::default();

        for name in tools {
            let executor = all
                .executors
                .get(*name)
                .ok_or_else(|| ToolError::not_found(*name))?;
            registry
                .executors
                .insert((*name).to_string(), Arc::clone(executor));
        }

        Ok(registry)
    }

    /// Lists all filesystem tool names.
    #[must_use]
    pub fn available() -> Vec<&'static str> {
        vec!["read_file", "write_file", "list_dir"]
    }

    /// Returns the executor for a specific tool.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<BoxedToolExecutor>> {
        self.executors.get(name).cloned()
    }

    /// Returns the registered tool names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.executors.keys().map(String::as_str)
    }

    /// Returns the descriptors of every registered tool.
    #[must_use]
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.executors.values().map(|e| e.definition()).collect()
    }

    /// Dispatches a call to the named tool.
    ///
    /// An unknown name produces an error result rather than a panic.
    pub async fn execute(&self, name: &str, ctx: &ToolContext, args: Value) -> ToolResult {
        match self.executors.get(name) {
            Some(executor) => {
                tracing::debug!(tool = name, "executing tool");
                let result = executor.execute(ctx, args).await;
                if result.is_error {
                    tracing::info!(tool = name, error = %result.content, "tool call failed");
                }
                result
            }
            None => ToolResult::from(ToolError::not_found(name)),
        }
    }

    /// Returns the number of registered tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.executors.len()
    }

    /// Returns true if no tools are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.executors.is_empty()
    }

    fn register(&mut self, executor: BoxedToolExecutor) {
        let name = executor.definition().name;
        self.executors.insert(name, Arc::new(executor));
    }
}
