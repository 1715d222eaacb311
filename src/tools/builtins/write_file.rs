//! Write file built-in tool.
//!
//! Writes content to a file, creating parent directories if needed.

use crate::tools::builtins::parse_args;
use crate::tools::security::PathValidator;
use crate::tools::{
    ToolContext, ToolDefinition, ToolError, ToolExecutionFuture, ToolExecutorTrait, ToolResult,
};
use serde::Deserialize;
use serde_json::{json, Value};

const NAME: &str = "write_file";

/// Write file tool executor.
///
/// Validation runs before any directory is created, so a denied path leaves
/// the filesystem untouched.
#[derive(Debug, Default, Clone)]
pub struct WriteFileTool {
    validator: PathValidator,
}

/// Arguments for the write_file tool.
#[derive(Debug, Deserialize)]
struct WriteFileArgs {
    /// Path to the file, absolute or relative to the workspace
    path: String,
    /// Content to write to the file
    content: String,
}

impl WriteFileTool {
    /// Creates a write file tool that checks every path with `validator`.
    #[must_use]
    pub fn new(validator: PathValidator) -> Self {
        Self { validator }
    }

    /// Returns the tool descriptor.
    #[must_use]
    pub fn tool_definition() -> ToolDefinition {
        ToolDefinition::new(
            NAME,
            "Write content to a file",
            json!({
                "type": "object",
                "properties": {
                    "path": {
                        "type": "string",
                        "description": "Path to the file to write"
                    },
                    "content": {
                        "type": "string",
                        "description": "Content to write to the file"
                    }
                },
                "required": ["path", "content"]
            }),
        )
    }

    async fn run(validator: PathValidator, args: Value) -> Result<ToolResult, ToolError> {
        let args: WriteFileArgs = parse_args(NAME, args)?;

        let path = validator
            .validate(&args.path)
            .map_err(|e| ToolError::path_rejected(NAME, e))?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                ToolError::execution_failed(NAME, format!("failed to create directory: {e}"))
            })?;
        }

        tokio::fs::write(&path, args.content.as_bytes())
            .await
            .map_err(|e| ToolError::execution_failed(NAME, format!("failed to write file: {e}")))?;

        tracing::debug!(path = %path.display(), bytes = args.content.len(), "file written");
        Ok(ToolResult::silent(format!("File written: {}", args.path)))
    }
}

impl ToolExecutorTrait for WriteFileTool {
    fn definition(&self) -> ToolDefinition {
        Self::tool_definition()
    }

    fn execute(&self, _ctx: &ToolContext, args: Value) -> ToolExecutionFuture {
        let validator = self.validator.clone();
        Box::pin(async move { ToolResult::from(Self::run(validator, args).await) })
    }
}
