//! Integration tests for the path validator's public contract.
//!
//! These tests exercise `validate_path` and `PathValidator` against real
//! directory trees:
//! - Containment of workspace-relative and absolute paths
//! - Denial of traversal and of paths outside every permitted root
//! - Symlink escapes, including through not-yet-existing segments

use acton_fs_guard::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const NO_ROOTS: &[&str] = &[];

fn ws(dir: &TempDir) -> String {
    dir.path().to_string_lossy().into_owned()
}

/// Canonical form of `path`, or of its parent when `path` does not exist.
fn canonical_or_parent(path: &Path) -> std::path::PathBuf {
    match fs::canonicalize(path) {
        Ok(p) => p,
        Err(_) => fs::canonicalize(path.parent().unwrap())
            .unwrap()
            .join(path.file_name().unwrap()),
    }
}

#[test]
fn contained_paths_resolve_under_workspace() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("a/b")).unwrap();
    fs::write(dir.path().join("a/b/c.txt"), "c").unwrap();
    let ws_real = fs::canonicalize(dir.path()).unwrap();

    for candidate in [".", "a", "a/b", "a/b/c.txt", "a/b/new.txt", "./a/../a/b"] {
        let resolved = validate_path(candidate, &ws(&dir), NO_ROOTS, true)
            .unwrap_or_else(|e| panic!("{candidate} denied: {e}"));

        assert!(resolved.is_absolute());
        assert!(
            canonical_or_parent(&resolved).starts_with(&ws_real),
            "{candidate} resolved to {}",
            resolved.display()
        );
    }
}

#[test]
fn outside_paths_are_denied_with_fixed_message() {
    let dir = TempDir::new().unwrap();
    let other = TempDir::new().unwrap();

    let candidates = [
        "../../etc/passwd".to_string(),
        "/etc/passwd".to_string(),
        other.path().join("x.txt").to_string_lossy().into_owned(),
        "a/../../sibling".to_string(),
    ];

    for candidate in &candidates {
        let err = validate_path(candidate, &ws(&dir), NO_ROOTS, true).unwrap_err();
        assert!(err.is_denial());
        assert_eq!(
            err.to_string(),
            "access denied: path is outside the workspace and allowed paths"
        );
    }
}

#[test]
fn traversal_from_fixed_workspace_is_denied() {
    let err = validate_path("../../etc/passwd", "/home/agent/workspace", NO_ROOTS, true)
        .unwrap_err();
    assert!(err.to_string().contains("outside the workspace and allowed paths"));
}

#[test]
fn allowed_root_admits_outside_path() {
    let dir = TempDir::new().unwrap();
    let shared = TempDir::new().unwrap();
    fs::write(shared.path().join("data.csv"), "1,2").unwrap();
    let target = shared.path().join("data.csv");

    let validator = PathValidator::new(ws(&dir)).with_allowed_path(ws(&shared));

    assert_eq!(validator.validate(&target.to_string_lossy()).unwrap(), target);
}

#[test]
fn unrestricted_accepts_anything() {
    let dir = TempDir::new().unwrap();

    for candidate in ["../../etc/passwd", "/etc/shadow", "/nonexistent/deep/file"] {
        let resolved = validate_path(candidate, &ws(&dir), NO_ROOTS, false).unwrap();
        assert!(resolved.is_absolute());
    }
}

#[test]
fn subdir_file_yields_joined_path() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("subdir")).unwrap();

    let resolved = validate_path("subdir/file.txt", &ws(&dir), NO_ROOTS, true).unwrap();
    assert_eq!(resolved, dir.path().join("subdir/file.txt"));
}

#[test]
fn validation_is_idempotent() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("subdir")).unwrap();
    let validator = PathValidator::new(ws(&dir));

    for candidate in ["subdir/x", "../escape", "missing/deeper/x"] {
        assert_eq!(validator.validate(candidate), validator.validate(candidate));
    }
}

#[test]
fn empty_workspace_passes_path_through() {
    let resolved = validate_path("../../etc/passwd", "", NO_ROOTS, true).unwrap();
    assert_eq!(resolved, Path::new("../../etc/passwd"));
}

#[cfg(unix)]
mod symlinks {
    use super::*;
    use std::os::unix::fs::symlink;

    #[test]
    fn symlink_to_outside_is_denied() {
        let dir = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("secret"), "s").unwrap();
        symlink(outside.path().join("secret"), dir.path().join("link")).unwrap();

        let err = validate_path("link", &ws(&dir), NO_ROOTS, true).unwrap_err();
        assert!(err.is_denial());
        assert_eq!(
            err.to_string(),
            "access denied: symlink resolves outside workspace and allowed paths"
        );
    }

    #[test]
    fn missing_segments_under_escaping_symlink_are_denied() {
        let dir = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        symlink(outside.path(), dir.path().join("out")).unwrap();

        let err = validate_path("out/new/dir/file.txt", &ws(&dir), NO_ROOTS, true).unwrap_err();
        assert!(err.to_string().contains("symlink resolves outside"));
    }

    #[test]
    fn symlinked_allowed_root_admits_link_and_real_forms() {
        let dir = TempDir::new().unwrap();
        let base = TempDir::new().unwrap();
        let real = base.path().join("real");
        fs::create_dir(&real).unwrap();
        fs::write(real.join("a"), "a").unwrap();
        let link = base.path().join("link");
        symlink(&real, &link).unwrap();

        let validator = PathValidator::new(ws(&dir)).with_allowed_path(link.to_string_lossy());
        let real_canonical = fs::canonicalize(&real).unwrap();

        let via_link = link.join("a");
        assert_eq!(validator.validate(&via_link.to_string_lossy()).unwrap(), via_link);

        let via_real = real_canonical.join("a");
        assert_eq!(validator.validate(&via_real.to_string_lossy()).unwrap(), via_real);

        let new_nested = real_canonical.join("n/b");
        assert_eq!(validator.validate(&new_nested.to_string_lossy()).unwrap(), new_nested);
        assert!(!real.join("n").exists());
    }

    #[test]
    fn symlink_into_allowed_root_is_accepted() {
        let dir = TempDir::new().unwrap();
        let shared = TempDir::new().unwrap();
        symlink(shared.path(), dir.path().join("shared")).unwrap();

        let validator = PathValidator::new(ws(&dir)).with_allowed_path(ws(&shared));
        assert!(validator.validate("shared/new.txt").is_ok());
    }
}
