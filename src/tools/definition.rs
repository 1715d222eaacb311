//! Tool definition and executor traits.
//!
//! Defines the descriptor advertised to the dispatch layer, the per-call
//! context, the uniform result object, and the trait every tool implements.

use crate::tools::error::ToolError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;
use std::time::Instant;

/// Descriptor for a tool: its name, a human-readable description, and the
/// JSON schema of its arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Name used to dispatch calls to the tool
    pub name: String,
    /// What the tool does, shown to the model
    pub description: String,
    /// JSON schema object describing the arguments
    pub input_schema: Value,
}

impl ToolDefinition {
    /// Creates a new tool definition.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>, input_schema: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }

    /// Returns the names listed in the schema's `required` array.
    #[must_use]
    pub fn required_arguments(&self) -> Vec<&str> {
        self.input_schema["required"]
            .as_array()
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

/// Per-call context handed to [`ToolExecutorTrait::execute`].
///
/// Carries the caller's deadline. The built-in filesystem tools complete in
/// bounded time and do not consult it; callers wanting a hard limit wrap the
/// returned future in their own timeout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToolContext {
    /// Instant after which the caller no longer wants the result
    pub deadline: Option<Instant>,
}

impl ToolContext {
    /// Creates a context with no deadline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the deadline.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Returns true if a deadline is set and has passed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

/// Outcome of a tool call.
///
/// Every failure, whether a policy denial, a bad argument, or an OS error,
/// is folded into an error result carrying only a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Payload on success, message on failure
    pub content: String,
    /// Whether the call failed
    pub is_error: bool,
    /// Success that should not be echoed back in bulk (e.g. writes)
    pub silent: bool,
}

impl ToolResult {
    /// Creates a successful result carrying `content`.
    #[must_use]
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: false,
            silent: false,
        }
    }

    /// Creates a successful result that only carries a short confirmation.
    #[must_use]
    pub fn silent(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: false,
            silent: true,
        }
    }

    /// Creates an error result.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: message.into(),
            is_error: true,
            silent: false,
        }
    }
}

impl From<ToolError> for ToolResult {
    fn from(error: ToolError) -> Self {
        Self::error(error.to_string())
    }
}

impl From<Result<ToolResult, ToolError>> for ToolResult {
    fn from(result: Result<ToolResult, ToolError>) -> Self {
        result.unwrap_or_else(Self::from)
    }
}

/// The future returned by tool execution.
pub type ToolExecutionFuture = Pin<Box<dyn Future<Output = ToolResult> + Send + 'static>>;

/// Trait for executing tools.
///
/// Execution never fails at the type level: errors come back as
/// [`ToolResult::error`] so a dispatch layer can forward them verbatim.
///
/// # Example
///
/// ```rust
/// use acton_fs_guard::tools::{ToolContext, ToolDefinition, ToolExecutionFuture, ToolExecutorTrait, ToolResult};
/// use serde_json::{json, Value};
///
/// #[derive(Debug)]
/// struct EchoTool;
///
/// impl ToolExecutorTrait for EchoTool {
///     fn definition(&self) -> ToolDefinition {
///         ToolDefinition::new("echo", "Echo the arguments", json!({"type": "object"}))
///     }
///
///     fn execute(&self, _ctx: &ToolContext, args: Value) -> ToolExecutionFuture {
///         Box::pin(async move { ToolResult::success(args.to_string()) })
///     }
/// }
/// ```
pub trait ToolExecutorTrait: Send + Sync + Debug {
    /// Returns the tool's descriptor.
    fn definition(&self) -> ToolDefinition;

    /// Executes the tool with the given arguments.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Per-call context (deadline)
    /// * `args` - JSON value containing the tool arguments
    fn execute(&self, ctx: &ToolContext, args: Value) -> ToolExecutionFuture;
}

/// A boxed tool executor for dynamic dispatch.
pub type BoxedToolExecutor = Box<dyn ToolExecutorTrait>;
