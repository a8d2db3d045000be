//! Path manipulation utilities.
//!
//! This module provides the path normalization used on every operand and
//! resolved symlink target: turning caller-supplied paths into absolute,
//! lexically cleaned forms without touching the filesystem beyond the
//! current-directory lookup.

use anyhow::{Context, Result};
use std::env;
use std::path::{Component, Path, PathBuf};

/// Returns the absolute, cleaned form of a path.
///
/// A relative path is joined onto the current working directory first; the
/// result is then passed through [`clean_path`]. The path itself does not
/// have to exist and no symlinks are resolved.
///
/// # Errors
///
/// Returns an error if the current working directory cannot be determined.
pub fn absolutize<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();

    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()
            .context("failed to determine the current working directory")?
            .join(path)
    };

    Ok(clean_path(&joined))
}

/// Lexically normalizes a path.
///
/// Removes `.` components, resolves inner `..` pairs against the preceding
/// component, drops `..` at the root, and keeps leading `..` components on
/// relative paths. Purely textual: symlinks are not consulted, so `a/..` is
/// treated as the directory containing `a` even when `a` is a link
/// elsewhere.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use lustra::paths::clean_path;
///
/// assert_eq!(clean_path(Path::new("/a/b/../c/./d")), PathBuf::from("/a/c/d"));
/// assert_eq!(clean_path(Path::new("../x/../y")), PathBuf::from("../y"));
/// assert_eq!(clean_path(Path::new("/..")), PathBuf::from("/"));
/// ```
pub fn clean_path(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => cleaned.push(component),
            Component::CurDir => {}
            Component::ParentDir => match cleaned.components().next_back() {
                Some(Component::Normal(_)) => {
                    cleaned.pop();
                }
                // ".." directly under the root stays at the root.
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                // Relative paths keep leading ".." components.
                _ => cleaned.push(".."),
            },
            Component::Normal(name) => cleaned.push(name),
        }
    }

    if cleaned.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        cleaned
    }
}
