//! Path validation for workspace-scoped filesystem access.
//!
//! Provides `PathValidator` for deciding whether a path requested by a tool
//! call lies inside the workspace root or one of the extra allowed roots,
//! including after every symlink along the way has been resolved.

use std::fmt;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Maximum number of dangling symlinks followed while looking for the
/// nearest existing ancestor (matches Linux `MAXSYMLINKS`).
const MAX_SYMLINK_HOPS: usize = 40;

/// Error returned when path validation fails.
///
/// Two variants are policy denials and always render one of two fixed
/// messages so downstream layers can match on them. The remaining variants
/// are hard errors: the filesystem could not be inspected, which says
/// nothing about whether the path would have been allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathValidationError {
    /// The cleaned absolute path is outside every permitted root.
    OutsideAllowedRoots {
        /// The absolute path that was rejected.
        path: PathBuf,
    },
    /// The path is inside a root lexically but its symlink-resolved form
    /// (or that of its nearest existing ancestor) is not.
    SymlinkEscape {
        /// The absolute path that was rejected.
        path: PathBuf,
        /// Where the path (or its nearest existing ancestor) resolved to.
        resolved: PathBuf,
    },
    /// The workspace root could not be made absolute.
    WorkspaceResolution {
        /// The workspace as configured.
        workspace: String,
        /// The underlying error reason.
        reason: String,
    },
    /// Symlink resolution failed for a reason other than a missing path.
    Resolution {
        /// The absolute path being resolved.
        path: PathBuf,
        /// The underlying error reason.
        reason: String,
    },
}

impl PathValidationError {
    /// Returns true if this is a policy denial rather than a system failure.
    #[must_use]
    pub fn is_denial(&self) -> bool {
        matches!(
            self,
            Self::OutsideAllowedRoots { .. } | Self::SymlinkEscape { .. }
        )
    }

    /// Returns true if validation could not complete because of an I/O or
    /// resolution failure.
    #[must_use]
    pub fn is_hard_error(&self) -> bool {
        !self.is_denial()
    }

    fn resolution(path: &Path, err: &io::Error) -> Self {
        Self::Resolution {
            path: path.to_path_buf(),
            reason: err.to_string(),
        }
    }
}

impl fmt::Display for PathValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutsideAllowedRoots { .. } => {
                write!(
                    f,
                    "access denied: path is outside the workspace and allowed paths"
                )
            }
            Self::SymlinkEscape { .. } => {
                write!(
                    f,
                    "access denied: symlink resolves outside workspace and allowed paths"
                )
            }
            Self::WorkspaceResolution { workspace, reason } => {
                write!(
                    f,
                    "failed to resolve workspace path '{}': {}",
                    workspace, reason
                )
            }
            Self::Resolution { reason, .. } => {
                write!(f, "failed to resolve path: {}", reason)
            }
        }
    }
}

impl std::error::Error for PathValidationError {}

/// Validates paths against a workspace root and a set of allowed roots.
///
/// The configuration is fixed at construction and every call to
/// [`validate`](Self::validate) is independent, so a validator can be cloned
/// into each tool and shared across tasks freely.
///
/// # Example
///
/// ```rust,ignore
/// use acton_fs_guard::tools::security::PathValidator;
///
/// let validator = PathValidator::new("/home/agent/workspace")
///     .with_allowed_path("/srv/shared");
///
/// // Relative paths are joined to the workspace
/// let path = validator.validate("notes/todo.md")?;
///
/// // Traversal out of the workspace is denied
/// assert!(validator.validate("../../etc/passwd").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathValidator {
    /// Primary directory; relative paths are joined to it.
    workspace: String,
    /// Additional directories where access is permitted.
    allowed_paths: Vec<String>,
    /// Whether containment is enforced at all.
    restrict: bool,
}

impl PathValidator {
    /// Creates a validator scoped to `workspace` with restriction enabled.
    #[must_use]
    pub fn new(workspace: impl Into<String>) -> Self {
        Self {
            workspace: workspace.into(),
            allowed_paths: Vec::new(),
            restrict: true,
        }
    }

    /// Adds a directory that is permitted alongside the workspace.
    #[must_use]
    pub fn with_allowed_path(mut self, path: impl Into<String>) -> Self {
        self.allowed_paths.push(path.into());
        self
    }

    /// Adds several permitted directories.
    #[must_use]
    pub fn with_allowed_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_paths.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Enables or disables containment enforcement.
    ///
    /// With restriction disabled, paths are only joined to the workspace and
    /// cleaned.
    #[must_use]
    pub fn with_restrict(mut self, restrict: bool) -> Self {
        self.restrict = restrict;
        self
    }

    /// Returns the configured workspace root.
    #[must_use]
    pub fn workspace(&self) -> &str {
        &self.workspace
    }

    /// Returns the configured extra roots.
    #[must_use]
    pub fn allowed_paths(&self) -> &[String] {
        &self.allowed_paths
    }

    /// Returns true if containment is enforced.
    #[must_use]
    pub fn restricts(&self) -> bool {
        self.restrict
    }

    /// Validates `path` against this validator's configuration.
    ///
    /// See [`validate_path`] for the full set of rules.
    ///
    /// # Errors
    ///
    /// Returns a denial when the path leaves the permitted roots, or a hard
    /// error when the workspace or the path cannot be resolved.
    pub fn validate(&self, path: &str) -> Result<PathBuf, PathValidationError> {
        validate_path(path, &self.workspace, &self.allowed_paths, self.restrict)
    }
}

/// Validates a requested path and returns its absolute, cleaned form.
///
/// Rules, in order:
/// 1. An empty `workspace` means no sandbox is configured; `path` is returned
///    unchanged. This is intentional for callers that never set a workspace.
/// 2. The workspace is made absolute; failure is a hard error.
/// 3. Absolute paths are cleaned as-is, relative paths are joined to the
///    workspace first. Absolute paths are still subject to containment.
/// 4. Without `restrict`, the absolute path is returned.
/// 5. With `restrict`, the path must be lexically inside the workspace or an
///    allowed root (raw form first, then symlink-resolved form), and its
///    symlink-resolved form must be too. A path that does not exist yet is
///    judged by its nearest existing ancestor.
///
/// On success the logical absolute path is returned, never the resolved one.
/// Nothing stops the filesystem from changing between this check and the
/// caller's own I/O.
///
/// # Errors
///
/// See [`PathValidationError`].
pub fn validate_path<S: AsRef<str>>(
    path: &str,
    workspace: &str,
    allowed_paths: &[S],
    restrict: bool,
) -> Result<PathBuf, PathValidationError> {
    if workspace.is_empty() {
        return Ok(PathBuf::from(path));
    }

    let abs_workspace = absolutize(Path::new(workspace)).map_err(|e| {
        PathValidationError::WorkspaceResolution {
            workspace: workspace.to_string(),
            reason: e.to_string(),
        }
    })?;

    let requested = Path::new(path);
    let abs_path = if requested.is_absolute() {
        clean(requested)
    } else {
        clean(&abs_workspace.join(requested))
    };

    if !restrict {
        return Ok(abs_path);
    }

    let roots = RootSet::build(&abs_workspace, allowed_paths);

    if !roots.contains(&abs_path) {
        tracing::warn!(
            path = %abs_path.display(),
            "path rejected: outside workspace and allowed paths"
        );
        return Err(PathValidationError::OutsideAllowedRoots { path: abs_path });
    }

    let resolved = match std::fs::canonicalize(&abs_path) {
        Ok(resolved) => resolved,
        Err(e) if e.kind() == io::ErrorKind::NotFound => resolve_existing_ancestor(&abs_path)
            .map_err(|e| PathValidationError::resolution(&abs_path, &e))?,
        Err(e) => return Err(PathValidationError::resolution(&abs_path, &e)),
    };

    if !roots.contains(&resolved) {
        tracing::warn!(
            path = %abs_path.display(),
            resolved = %resolved.display(),
            "path rejected: symlink resolves outside workspace and allowed paths"
        );
        return Err(PathValidationError::SymlinkEscape {
            path: abs_path,
            resolved,
        });
    }

    tracing::debug!(path = %abs_path.display(), resolved = %resolved.display(), "path allowed");
    Ok(abs_path)
}

/// Resolves the nearest existing ancestor of `path`, symlinks included.
///
/// Starting at `path` itself, each level is canonicalized; on "not found"
/// the walk moves to the parent. A level that is a dangling symlink is
/// replaced by its target so the check follows where a later write would
/// actually land.
///
/// A level ending in `..` that does not resolve is never stripped: the
/// directory before the `..` is missing, so no write could get past it and
/// dropping the segment would judge an unrelated directory instead.
///
/// # Errors
///
/// Returns `NotFound` once the filesystem root is passed without any level
/// resolving or when a `..` follows a missing directory, and propagates
/// every other I/O error unchanged.
pub fn resolve_existing_ancestor(path: &Path) -> io::Result<PathBuf> {
    let mut current = path.to_path_buf();
    let mut hops = 0;

    loop {
        match std::fs::canonicalize(&current) {
            Ok(resolved) => return Ok(resolved),
            Err(e) if e.kind() != io::ErrorKind::NotFound => return Err(e),
            Err(_) => {}
        }

        if let Some(target) = dangling_link_target(&current)? {
            hops += 1;
            if hops > MAX_SYMLINK_HOPS {
                return Err(io::Error::new(
                    io::ErrorKind::Other,
                    "too many levels of symbolic links",
                ));
            }
            current = target;
            continue;
        }

        if matches!(current.components().next_back(), Some(Component::ParentDir)) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                "path traverses a missing directory",
            ));
        }

        match current.parent() {
            Some(parent) if parent != current => current = parent.to_path_buf(),
            _ => {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    "no existing ancestor directory",
                ))
            }
        }
    }
}

/// Returns the target of `path` if it is itself a symlink.
///
/// The target is joined to the link's directory without lexical cleaning.
/// A `..` in it is only ever resolved by canonicalizing the level that ends
/// with it, never by the parent walk in [`resolve_existing_ancestor`].
fn dangling_link_target(path: &Path) -> io::Result<Option<PathBuf>> {
    match std::fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            let target = std::fs::read_link(path)?;
            let base = path.parent().unwrap_or(path);
            Ok(Some(base.join(target)))
        }
        Ok(_) => Ok(None),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Returns true if `candidate` equals `root` or lies beneath it.
///
/// Both paths are cleaned and compared component-wise, so `/ws-other` is not
/// inside `/ws`.
#[must_use]
pub fn is_within(candidate: &Path, root: &Path) -> bool {
    relative_path(root, candidate)
        .is_some_and(|rel| !matches!(rel.components().next(), Some(Component::ParentDir)))
}

/// Computes the lexical path from `base` to `target`.
///
/// Returns `None` when no relative path exists: one path is absolute and the
/// other is not, they live under different prefixes, or `base` has leading
/// `..` segments that `target` does not share.
#[must_use]
pub fn relative_path(base: &Path, target: &Path) -> Option<PathBuf> {
    let base = clean(base);
    let target = clean(target);
    if base.is_absolute() != target.is_absolute() {
        return None;
    }

    let base_parts: Vec<Component<'_>> = base
        .components()
        .filter(|c| *c != Component::CurDir)
        .collect();
    let target_parts: Vec<Component<'_>> = target
        .components()
        .filter(|c| *c != Component::CurDir)
        .collect();

    let common = base_parts
        .iter()
        .zip(&target_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let unmatched = &base_parts[common..];
    if unmatched.iter().any(|c| {
        matches!(
            c,
            Component::Prefix(_) | Component::RootDir | Component::ParentDir
        )
    }) {
        return None;
    }

    let mut rel = PathBuf::new();
    for _ in unmatched {
        rel.push(Component::ParentDir);
    }
    for part in &target_parts[common..] {
        rel.push(part);
    }

    if rel.as_os_str().is_empty() {
        rel.push(Component::CurDir);
    }
    Some(rel)
}

/// Lexically normalizes a path without touching the filesystem.
///
/// Drops `.` segments and redundant separators, folds `name/..`, never
/// climbs above the root, and keeps leading `..` on relative paths. An
/// empty result becomes `.`.
#[must_use]
pub fn clean(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => parts.push(comp),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}

/// Makes `path` absolute against the process working directory and cleans it.
///
/// # Errors
///
/// Fails only if `path` is relative and the working directory is unavailable.
pub fn absolutize(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        return Ok(clean(path));
    }
    let cwd = std::env::current_dir()?;
    Ok(clean(&cwd.join(path)))
}

/// Permitted roots for one validation call, in check order.
#[derive(Debug)]
struct RootSet {
    /// Absolute roots as configured: workspace first, then allowed paths.
    raw: Vec<PathBuf>,
    /// The same roots with symlinks resolved, falling back to the raw form
    /// when resolution fails.
    real: Vec<PathBuf>,
}

impl RootSet {
    fn build<S: AsRef<str>>(workspace: &Path, allowed_paths: &[S]) -> Self {
        let mut raw = vec![workspace.to_path_buf()];
        for entry in allowed_paths {
            let entry = entry.as_ref();
            // An empty entry would absolutize to the working directory.
            if entry.is_empty() {
                continue;
            }
            match absolutize(Path::new(entry)) {
                Ok(abs) => raw.push(abs),
                Err(e) => tracing::warn!(
                    allowed_path = entry,
                    error = %e,
                    "skipping allowed path that cannot be made absolute"
                ),
            }
        }

        let real = raw
            .iter()
            .map(|root| std::fs::canonicalize(root).unwrap_or_else(|_| root.clone()))
            .collect();

        Self { raw, real }
    }

    /// Raw roots first, then resolved roots; first match wins.
    fn contains(&self, candidate: &Path) -> bool {
        self.raw.iter().any(|root| is_within(candidate, root))
            || self.real.iter().any(|root| is_within(candidate, root))
    }
}
