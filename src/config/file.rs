//! Configuration file loading.
//!
//! This module handles loading acton-fs-guard configuration from TOML files
//! at XDG-compliant locations.

use crate::config::types::FsGuardConfig;
use crate::error::FsGuardError;
use std::path::{Path, PathBuf};

/// Default configuration file name for project-local config.
const LOCAL_CONFIG_NAME: &str = "acton-fs-guard.toml";

/// Default configuration file name within XDG config directory.
const XDG_CONFIG_NAME: &str = "config.toml";

/// Application name for XDG directory lookup.
const APP_NAME: &str = "acton-fs-guard";

/// Loads configuration from the default search paths.
///
/// Search order:
/// 1. `./acton-fs-guard.toml` (project-local)
/// 2. `~/.config/acton-fs-guard/config.toml` (XDG config)
///
/// Returns the default configuration if no config file is found.
///
/// # Errors
///
/// Returns an error if a config file exists but cannot be parsed.
///
/// # Example
///
/// ```rust,ignore
/// use acton_fs_guard::config::load;
///
/// let config = load()?;
/// if config.is_unsandboxed() {
///     println!("No workspace configured; paths are not confined");
/// }
/// ```
pub fn load() -> Result<FsGuardConfig, FsGuardError> {
    for path in search_paths() {
        if path.exists() {
            return from_path(&path);
        }
    }

    Ok(FsGuardConfig::default())
}

/// Loads configuration from a specific file path.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The file contains invalid TOML
/// - The TOML doesn't match the expected schema
pub fn from_path(path: &Path) -> Result<FsGuardConfig, FsGuardError> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        FsGuardError::configuration(
            "config_file",
            format!("failed to read '{}': {}", path.display(), e),
        )
    })?;

    let config = from_str(&contents).map_err(|e| {
        FsGuardError::configuration(
            "config_file",
            format!("failed to parse '{}': {}", path.display(), e),
        )
    })?;

    tracing::debug!(path = %path.display(), "configuration loaded");
    Ok(config)
}

/// Parses configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or doesn't match the schema.
///
/// # Example
///
/// ```rust,ignore
/// use acton_fs_guard::config::from_str;
///
/// let toml = r#"
/// workspace = "/home/agent/project"
/// allowed_paths = ["/usr/share/dict"]
/// "#;
///
/// let config = from_str(toml)?;
/// ```
pub fn from_str(toml_str: &str) -> Result<FsGuardConfig, FsGuardError> {
    toml::from_str(toml_str)
        .map_err(|e| FsGuardError::configuration("config", format!("invalid TOML: {e}")))
}

/// Returns the paths that would be searched for configuration files, in
/// search order.
#[must_use]
pub fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG_NAME)];

    if let Some(dir) = xdg_config_dir() {
        paths.push(dir.join(XDG_CONFIG_NAME));
    }

    paths
}

/// Returns the path to the XDG config directory for acton-fs-guard.
///
/// This is `~/.config/acton-fs-guard` on most systems.
#[must_use]
pub fn xdg_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(APP_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogLevel;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn load_does_not_error_without_config() {
        // A user config may exist on the machine; only check it parses.
        let _ = load();
    }

    #[test]
    fn from_str_parses_valid_toml() {
        let toml = r#"
workspace = "/srv/agent"
allowed_paths = ["/opt/shared", ""]
restrict_to_workspace = false

[logging]
enabled = true
level = "debug"
        "#;

        let config = from_str(toml).unwrap();

        assert_eq!(config.workspace, "/srv/agent");
        assert_eq!(config.allowed_paths.len(), 2);
        assert!(!config.restrict_to_workspace);
        assert!(config.logging.enabled);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.app_name, "acton-fs-guard");
    }

    #[test]
    fn from_str_empty_is_default() {
        assert_eq!(from_str("").unwrap(), FsGuardConfig::default());
    }

    #[test]
    fn from_str_error_on_invalid_toml() {
        let err = from_str("this is not valid toml [[[").unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn from_str_error_on_wrong_type() {
        let err = from_str("allowed_paths = \"/opt\"").unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("invalid TOML"));
    }

    #[test]
    fn from_path_reads_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, r#"workspace = "/srv/agent""#).unwrap();

        let config = from_path(&config_path).unwrap();

        assert_eq!(config.workspace, "/srv/agent");
        assert!(config.restrict_to_workspace);
    }

    #[test]
    fn from_path_error_on_missing_file() {
        let err = from_path(Path::new("/nonexistent/path/config.toml")).unwrap_err();

        assert!(err.is_configuration());
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn search_paths_starts_with_local() {
        let paths = search_paths();

        assert_eq!(paths[0], PathBuf::from(LOCAL_CONFIG_NAME));
    }

    #[test]
    fn xdg_config_dir_returns_path() {
        if let Some(dir) = xdg_config_dir() {
            assert!(dir.ends_with(APP_NAME));
        }
    }
}
