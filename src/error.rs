//! Crate-level error types.
//!
//! Errors raised outside a single tool call: loading configuration and
//! setting up logging. Each error type implements Display, Debug, Clone,
//! PartialEq, Eq, and std::error::Error.
//!
//! No external error crates (anyhow, thiserror, eyre) are used.

use crate::logging::LoggingError;
use std::fmt;

/// Errors that can occur while configuring the filesystem guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsGuardError {
    /// The specific error that occurred
    pub kind: FsGuardErrorKind,
}

/// Specific configuration and setup error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsGuardErrorKind {
    /// Configuration could not be read or was invalid
    Configuration {
        /// Description of what was invalid
        field: String,
        /// Why it was invalid
        reason: String,
    },
    /// Logging could not be initialized
    Logging {
        /// The underlying logging error
        source: LoggingError,
    },
}

impl FsGuardError {
    /// Creates a new FsGuardError with the given kind.
    #[must_use]
    pub fn new(kind: FsGuardErrorKind) -> Self {
        Self { kind }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(FsGuardErrorKind::Configuration {
            field: field.into(),
            reason: reason.into(),
        })
    }

    /// Returns true if this error indicates a configuration problem.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self.kind, FsGuardErrorKind::Configuration { .. })
    }
}

impl fmt::Display for FsGuardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            FsGuardErrorKind::Configuration { field, reason } => {
                write!(f, "configuration error for '{}': {}", field, reason)
            }
            FsGuardErrorKind::Logging { source } => {
                write!(f, "logging setup failed: {}", source)
            }
        }
    }
}

impl std::error::Error for FsGuardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            FsGuardErrorKind::Logging { source } => Some(source),
            FsGuardErrorKind::Configuration { .. } => None,
        }
    }
}

impl From<LoggingError> for FsGuardError {
    fn from(source: LoggingError) -> Self {
        Self::new(FsGuardErrorKind::Logging { source })
    }
}
