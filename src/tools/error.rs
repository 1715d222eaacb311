//! Tool error types.
//!
//! Errors raised while a filesystem tool handles a call: bad arguments,
//! path policy rejections, and OS failures after validation passed.

use crate::tools::security::PathValidationError;
use std::fmt;

/// Errors that can occur while executing a tool.
///
/// This type uses Box<ToolErrorKind> to keep the error size small,
/// enabling efficient use in Result types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolError {
    kind: Box<ToolErrorKind>,
}

/// Specific tool error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolErrorKind {
    /// No tool with this name is registered
    NotFound {
        /// The name that was looked up
        tool_name: String,
    },
    /// A required argument was missing or had the wrong type
    InvalidArgument {
        /// The name of the tool
        tool_name: String,
        /// What was wrong with the arguments
        reason: String,
    },
    /// The path validator rejected the requested path
    PathRejected {
        /// The name of the tool
        tool_name: String,
        /// The validator's verdict
        error: PathValidationError,
    },
    /// The filesystem operation failed after validation
    ExecutionFailed {
        /// The name of the tool
        tool_name: String,
        /// Reason for failure, including the OS message
        reason: String,
    },
}

impl ToolError {
    /// Creates a new ToolError with the given kind.
    #[must_use]
    pub fn new(kind: ToolErrorKind) -> Self {
        Self {
            kind: Box::new(kind),
        }
    }

    /// Returns a reference to the error kind.
    #[must_use]
    pub fn kind(&self) -> &ToolErrorKind {
        &self.kind
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(tool_name: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::NotFound {
            tool_name: tool_name.into(),
        })
    }

    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(tool_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::InvalidArgument {
            tool_name: tool_name.into(),
            reason: reason.into(),
        })
    }

    /// Creates a path rejected error.
    #[must_use]
    pub fn path_rejected(tool_name: impl Into<String>, error: PathValidationError) -> Self {
        Self::new(ToolErrorKind::PathRejected {
            tool_name: tool_name.into(),
            error,
        })
    }

    /// Creates an execution failed error.
    #[must_use]
    pub fn execution_failed(tool_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::ExecutionFailed {
            tool_name: tool_name.into(),
            reason: reason.into(),
        })
    }

    /// Returns true if the path was blocked by policy.
    #[must_use]
    pub fn is_denial(&self) -> bool {
        matches!(&*self.kind, ToolErrorKind::PathRejected { error, .. } if error.is_denial())
    }

    /// Returns true if the call's arguments were missing or mistyped.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(*self.kind, ToolErrorKind::InvalidArgument { .. })
    }

    /// Returns true if no tool with the requested name exists.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(*self.kind, ToolErrorKind::NotFound { .. })
    }

    /// Returns the name of the tool that failed.
    #[must_use]
    pub fn tool_name(&self) -> &str {
        match self.kind.as_ref() {
            ToolErrorKind::NotFound { tool_name }
            | ToolErrorKind::InvalidArgument { tool_name, .. }
            | ToolErrorKind::PathRejected { tool_name, .. }
            | ToolErrorKind::ExecutionFailed { tool_name, .. } => tool_name,
        }
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind.as_ref() {
            ToolErrorKind::NotFound { tool_name } => {
                write!(
                    f,
                    "tool '{}' not found; verify the tool is registered",
                    tool_name
                )
            }
            ToolErrorKind::InvalidArgument { reason, .. } => write!(f, "{}", reason),
            ToolErrorKind::PathRejected { error, .. } => write!(f, "{}", error),
            ToolErrorKind::ExecutionFailed { reason, .. } => write!(f, "{}", reason),
        }
    }
}

impl std::error::Error for ToolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind.as_ref() {
            ToolErrorKind::PathRejected { error, .. } => Some(error),
            _ => None,
        }
    }
}
