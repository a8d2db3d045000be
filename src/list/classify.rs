//! Decides how a path operand is listed: as a single entry, or by
//! enumerating the contents of the directory it names.

use anyhow::{Context, Result};
use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};

use crate::paths::clean_path;

/// How a classified operand should be listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingMode {
    /// Enumerate the immediate children of the directory the path names.
    Contents,

    /// Print the entry itself as one line.
    Single,
}

/// Classifies a path from its link-aware metadata.
///
/// A directory lists its contents. A symlink lists contents only when its
/// direct target is a directory; the target is resolved exactly one level,
/// so a chain of links counts as a single entry. A link pointing into its
/// own ancestor directory would expand without bound under deeper
/// resolution, which is why chasing the chain further is rejected.
///
/// # Errors
///
/// Returns an error if the link target cannot be read or stat'd.
pub fn classify(path: &Path, meta: &Metadata) -> Result<ListingMode> {
    if meta.is_symlink() {
        let target = resolve_link_target(path)?;
        let target_meta = fs::symlink_metadata(&target)
            .with_context(|| format!("failed to read metadata of link target {}", target.display()))?;
        if target_meta.is_dir() {
            Ok(ListingMode::Contents)
        } else {
            Ok(ListingMode::Single)
        }
    } else if meta.is_dir() {
        Ok(ListingMode::Contents)
    } else {
        Ok(ListingMode::Single)
    }
}

/// Reads a symlink's target, one level deep.
///
/// A relative target is joined onto the link's containing directory and
/// lexically cleaned; an absolute target is returned verbatim.
pub fn resolve_link_target(path: &Path) -> Result<PathBuf> {
    let target = fs::read_link(path)
        .with_context(|| format!("failed to read link {}", path.display()))?;

    if target.is_absolute() {
        Ok(target)
    } else {
        let parent = path.parent().unwrap_or_else(|| Path::new("/"));
        Ok(clean_path(&parent.join(target)))
    }
}
