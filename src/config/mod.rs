//! Configuration management for acton-fs-guard.
//!
//! The workspace root, extra allowed roots and the restriction flag are
//! loaded once and injected into the tools through
//! [`FsGuardConfig::validator`]. Nothing reads them from global state.
//!
//! # Configuration File Format
//!
//! Configuration is stored in TOML format. The search order is:
//! 1. `./acton-fs-guard.toml` (project-local)
//! 2. `~/.config/acton-fs-guard/config.toml` (XDG config)
//!
//! # Example Configuration
//!
//! ```toml
//! workspace = "/home/agent/project"
//! allowed_paths = ["/usr/share/dict", "/opt/datasets"]
//! restrict_to_workspace = true
//!
//! [logging]
//! enabled = true
//! level = "info"
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use acton_fs_guard::config;
//!
//! let config = config::load()?;
//! let validator = config.validator();
//! ```

mod file;
mod types;

pub use file::{from_path, from_str, load, search_paths, xdg_config_dir};
pub use types::FsGuardConfig;
