//! Security utilities for tool execution.
//!
//! ## Path Validation
//!
//! [`PathValidator`] decides whether a filesystem tool may touch a path. It
//! is configured once with a workspace root, optional extra roots, and a
//! restriction flag, then injected into each tool:
//!
//! ```rust,ignore
//! use acton_fs_guard::tools::security::PathValidator;
//!
//! let validator = PathValidator::new("/home/agent/workspace")
//!     .with_allowed_path("/srv/datasets");
//!
//! match validator.validate("reports/summary.md") {
//!     Ok(path) => println!("Validated: {}", path.display()),
//!     Err(e) if e.is_denial() => eprintln!("Blocked: {}", e),
//!     Err(e) => eprintln!("Could not validate: {}", e),
//! }
//! ```
//!
//! ## Guarantees
//!
//! With restriction enabled a path is accepted only if:
//! - its cleaned absolute form lies inside the workspace or an allowed root
//!   (compared against both the configured and the symlink-resolved roots)
//! - its symlink-resolved form does too, or, for paths that do not exist
//!   yet, the resolved form of its nearest existing ancestor
//!
//! The validator does not lock the filesystem; a concurrent writer can still
//! swap a directory for a symlink between validation and use.

mod path;

pub use path::{
    absolutize, clean, is_within, relative_path, resolve_existing_ancestor, validate_path,
    PathValidationError, PathValidator,
};
