//! Configuration types for the filesystem guard.

use crate::logging::LoggingConfig;
use crate::tools::security::PathValidator;
use serde::{Deserialize, Serialize};

/// Root configuration structure.
///
/// This structure maps directly to the TOML configuration file format:
///
/// ```toml
/// workspace = "/home/agent/project"
/// allowed_paths = ["/usr/share/dict"]
/// restrict_to_workspace = true
///
/// [logging]
/// enabled = true
/// level = "debug"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FsGuardConfig {
    /// The workspace root. An empty string disables sandboxing entirely.
    #[serde(default)]
    pub workspace: String,

    /// Extra roots that are permitted besides the workspace.
    ///
    /// Empty entries are ignored.
    #[serde(default)]
    pub allowed_paths: Vec<String>,

    /// Whether paths are confined to the workspace and allowed paths.
    #[serde(default = "default_restrict")]
    pub restrict_to_workspace: bool,

    /// File logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_restrict() -> bool {
    true
}

impl Default for FsGuardConfig {
    fn default() -> Self {
        Self {
            workspace: String::new(),
            allowed_paths: Vec::new(),
            restrict_to_workspace: default_restrict(),
            logging: LoggingConfig::default(),
        }
    }
}

impl FsGuardConfig {
    /// Creates a default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the workspace root.
    #[must_use]
    pub fn with_workspace(mut self, workspace: impl Into<String>) -> Self {
        self.workspace = workspace.into();
        self
    }

    /// Adds an extra allowed root.
    #[must_use]
    pub fn with_allowed_path(mut self, path: impl Into<String>) -> Self {
        self.allowed_paths.push(path.into());
        self
    }

    /// Sets whether paths are confined to the permitted roots.
    #[must_use]
    pub fn with_restrict(mut self, restrict: bool) -> Self {
        self.restrict_to_workspace = restrict;
        self
    }

    /// Sets the logging configuration.
    #[must_use]
    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = logging;
        self
    }

    /// Returns true if no workspace is configured.
    #[must_use]
    pub fn is_unsandboxed(&self) -> bool {
        self.workspace.is_empty()
    }

    /// Builds the path validator described by this configuration.
    #[must_use]
    pub fn validator(&self) -> PathValidator {
        PathValidator::new(self.workspace.clone())
            .with_allowed_paths(self.allowed_paths.iter().cloned())
            .with_restrict(self.restrict_to_workspace)
    }
}
