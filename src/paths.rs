//! Path conversion helpers for workflow-relative storage.
//!
//! Configurations persist paths in a portable interchange form (`/`
//! separated, relative to the workflow root). The local filesystem wants
//! system separators and absolute paths. Conversions in both directions are
//! lossless so a stored path resolves back to the file the user picked.

use std::path::{Component, Path, PathBuf};

/// Convert a system-separator path string to the portable interchange form.
pub fn to_interchange(path: &str) -> String {
    if std::path::MAIN_SEPARATOR == '/' {
        path.to_string()
    } else {
        path.replace(std::path::MAIN_SEPARATOR, "/")
    }
}

/// Convert an interchange-form path string to system separators.
pub fn to_system(path: &str) -> String {
    if std::path::MAIN_SEPARATOR == '/' {
        path.to_string()
    } else {
        path.replace('/', std::path::MAIN_SEPARATOR_STR)
    }
}

/// Relative-ize `value` against the workflow root when it is absolute.
///
/// Values that are already relative pass through unchanged, which lets
/// stored configurations round-trip without re-normalization.
pub fn to_workflow_relative(value: &str, root: &Path) -> String {
    let path = Path::new(value);
    if path.is_absolute() {
        relative_between(path, root).to_string_lossy().into_owned()
    } else {
        value.to_string()
    }
}

/// Lexical relative path from `base` to `path`, both absolute.
///
/// Walks up with `..` when `path` is not under `base`, matching the
/// semantics a workflow relocation needs. Neither path is touched on disk.
pub fn relative_between(path: &Path, base: &Path) -> PathBuf {
    let path_comps: Vec<Component> = path.components().collect();
    let base_comps: Vec<Component> = base.components().collect();

    let mut shared = 0;
    while shared < path_comps.len()
        && shared < base_comps.len()
        && path_comps[shared] == base_comps[shared]
    {
        shared += 1;
    }

    let mut rel = PathBuf::new();
    for _ in shared..base_comps.len() {
        rel.push("..");
    }
    for comp in &path_comps[shared..] {
        rel.push(comp.as_os_str());
    }
    if rel.as_os_str().is_empty() {
        rel.push(".");
    }
    rel
}

/// Resolve a stored interchange path against the workflow root.
///
/// Symlinks are resolved when the target exists so port data is stable; a
/// missing target falls back to the joined path.
pub fn resolve_against(root: &Path, relative: &str) -> PathBuf {
    let joined = root.join(to_system(relative));
    std::fs::canonicalize(&joined).unwrap_or(joined)
}
