//! Flat specifiers and POSIX-style path normalization.
//!
//! A flat specifier is an input file's path relative to the run's root,
//! always written with `/` separators. Imports are resolved in this flat
//! namespace rather than on the real filesystem.

use crate::error::{SingleFileError, SingleFileResult};
use std::path::{Component, Path, PathBuf};

/// Compute the flat specifier of `file` relative to `root`.
///
/// The comparison is lexical first (ignoring `.` components), then falls
/// back to canonical paths so that a relative root can be paired with
/// absolute inputs and vice versa.
pub fn flat_specifier(root: &Path, file: &Path) -> SingleFileResult<String> {
    if let Some(specifier) = lexical_relative(root, file) {
        return Ok(specifier);
    }

    let outside_root = || SingleFileError::OutsideRoot {
        path: file.to_path_buf(),
        root: root.to_path_buf(),
    };
    let canonical_root = root.canonicalize().map_err(|_| outside_root())?;
    let canonical_file = file.canonicalize().map_err(|_| outside_root())?;
    lexical_relative(&canonical_root, &canonical_file).ok_or_else(outside_root)
}

fn lexical_relative(root: &Path, file: &Path) -> Option<String> {
    if root.has_root() != file.has_root() {
        return None;
    }
    let root: PathBuf = root
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    let file: PathBuf = file
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    let relative = file.strip_prefix(&root).ok()?;
    // A `..` detour can only be settled on the canonical paths
    if relative.components().any(|c| matches!(c, Component::ParentDir)) {
        return None;
    }

    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

/// Directory part of a flat specifier, empty for top level specifiers.
pub fn parent(specifier: &str) -> &str {
    match specifier.rfind('/') {
        Some(idx) => &specifier[..idx],
        None => "",
    }
}

/// Resolve `import_path` against the directory of `importer` and normalize.
pub fn resolve(importer: &str, import_path: &str) -> String {
    let dir = parent(importer);
    if import_path.starts_with('/') || dir.is_empty() {
        normalize(import_path)
    } else {
        normalize(&format!("{dir}/{import_path}"))
    }
}

/// Lexically normalize a `/`-separated path.
///
/// `.` segments and empty segments are dropped, `..` removes the previous
/// normal segment. Leading `..` segments of a relative path are kept and
/// a leading `/` is preserved. An empty result is `.`.
pub fn normalize(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                // `..` at the root of an absolute path stays at the root
                _ if rooted => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}
