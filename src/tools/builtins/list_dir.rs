//! List directory built-in tool.
//!
//! Lists directory entries, one per line, marked as `DIR:` or `FILE:`.

use crate::tools::security::PathValidator;
use crate::tools::{
    ToolContext, ToolDefinition, ToolError, ToolExecutionFuture, ToolExecutorTrait, ToolResult,
};
use serde::Deserialize;
use serde_json::{json, Value};

const NAME: &str = "list_dir";

/// List directory tool executor.
///
/// Unlike the read and write tools, a missing or non-string `path` is not an
/// error: the listing falls back to `"."`, the workspace root.
#[derive(Debug, Default, Clone)]
pub struct ListDirTool {
    validator: PathValidator,
}

/// Arguments for the list_dir tool.
#[derive(Debug, Default, Deserialize)]
struct ListDirArgs {
    /// Directory to list; kept untyped so a wrong type falls back to "."
    #[serde(default)]
    path: Option<Value>,
}

impl ListDirArgs {
    fn path(&self) -> &str {
        self.path.as_ref().and_then(Value::as_str).unwrap_or(".")
    }
}

impl ListDirTool {
    /// Creates a list directory tool that checks every path with `validator`.
    #[must_use]
    pub fn new(validator: PathValidator) -> Self {
        Self { validator }
    }

    /// Returns the tool descriptor.
    #[must_use]
    pub fn tool_definition() -> ToolDefinition {
        ToolDefinition::new(
            NAME,
            "List files and directories in a path",
            json!({
                "type": "object",
                "properties": {
                    "path": {
                        "type": "string",
                        "description": "Path to list"
                    }
                },
                "required": ["path"]
            }),
        )
    }

    async fn run(validator: PathValidator, args: Value) -> Result<ToolResult, ToolError> {
        let args: ListDirArgs = serde_json::from_value(args).unwrap_or_default();

        let path = validator
            .validate(args.path())
            .map_err(|e| ToolError::path_rejected(NAME, e))?;

        let mut read_dir = tokio::fs::read_dir(&path).await.map_err(|e| {
            ToolError::execution_failed(NAME, format!("failed to read directory: {e}"))
        })?;

        let mut entries = Vec::new();
        while let Some(entry) = read_dir.next_entry().await.map_err(|e| {
            ToolError::execution_failed(NAME, format!("failed to read directory: {e}"))
        })? {
            let is_dir = entry
                .file_type()
                .await
                .map(|ft| ft.is_dir())
                .unwrap_or(false);
            entries.push((entry.file_name().to_string_lossy().into_owned(), is_dir));
        }

        entries.sort_by(|a, b| a.0.cmp(&b.0));

        let listing: String = entries
            .iter()
            .map(|(name, is_dir)| {
                if *is_dir {
                    format!("DIR:  {name}\n")
                } else {
                    format!("FILE: {name}\n")
                }
            })
            .collect();

        tracing::debug!(path = %path.display(), count = entries.len(), "directory listed");
        Ok(ToolResult::success(listing))
    }
}

impl ToolExecutorTrait for ListDirTool {
    fn definition(&self) -> ToolDefinition {
        Self::tool_definition()
    }

    fn execute(&self, _ctx: &ToolContext, args: Value) -> ToolExecutionFuture {
        let validator = self.validator.clone();
        Box::pin(async move { ToolResult::from(Self::run(validator, args).await) })
    }
}
