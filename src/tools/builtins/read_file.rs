//! Read file built-in tool.
//!
//! Returns the full text content of a file inside the permitted roots.

use crate::tools::builtins::parse_args;
use crate::tools::security::PathValidator;
use crate::tools::{
    ToolContext, ToolDefinition, ToolError, ToolExecutionFuture, ToolExecutorTrait, ToolResult,
};
use serde::Deserialize;
use serde_json::{json, Value};

const NAME: &str = "read_file";

/// Read file tool executor.
#[derive(Debug, Default, Clone)]
pub struct ReadFileTool {
    validator: PathValidator,
}

/// Arguments for the read_file tool.
#[derive(Debug, Deserialize)]
struct ReadFileArgs {
    /// Path to the file, absolute or relative to the workspace
    path: String,
}

impl ReadFileTool {
    /// Creates a read file tool that checks every path with `validator`.
    #[must_use]
    pub fn new(validator: PathValidator) -> Self {
        Self { validator }
    }

    /// Returns the tool descriptor.
    #[must_use]
    pub fn tool_definition() -> ToolDefinition {
        ToolDefinition::new(
            NAME,
            "Read the contents of a file",
            json!({
                "type": "object",
                "properties": {
                    "path": {
                        "type": "string",
                        "description": "Path to the file to read"
                    }
                },
                "required": ["path"]
            }),
        )
    }

    async fn run(validator: PathValidator, args: Value) -> Result<ToolResult, ToolError> {
        let args: ReadFileArgs = parse_args(NAME, args)?;

        let path = validator
            .validate(&args.path)
            .map_err(|e| ToolError::path_rejected(NAME, e))?;

        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| ToolError::execution_failed(NAME, format!("failed to read file: {e}")))?;

        tracing::debug!(path = %path.display(), bytes = content.len(), "file read");
        Ok(ToolResult::success(content))
    }
}

impl ToolExecutorTrait for ReadFileTool {
    fn definition(&self) -> ToolDefinition {
        Self::tool_definition()
    }

    fn execute(&self, _ctx: &ToolContext, args: Value) -> ToolExecutionFuture {
        let validator = self.validator.clone();
        Box::pin(async move { ToolResult::from(Self::run(validator, args).await) })
    }
}
