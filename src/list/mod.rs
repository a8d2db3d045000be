use anyhow::{Context, Result};
use ignore::WalkBuilder;
use log::Level;
use std::fs::{self, Metadata};
use std::io::Write;
use std::path::Path;

use crate::format::{FileRecord, format_record};
use crate::options::ListOptions;
use crate::paths::absolutize;
use crate::telemetry::{LogMessage, log_with_context};

pub mod classify;


use classify::ListingMode;

/// Lists one path operand onto `out`, one line per entry.
///
/// The operand is made absolute first, so every printed line carries a full
/// path. A directory operand has its contents enumerated; with the
/// recursive option it is walked depth-first instead, the operand itself
/// printed first. Any other operand prints as a single line, except a
/// symlink whose direct target is a directory, which in non-recursive mode
/// lists that directory's contents through the link.
///
/// # Errors
///
/// Returns an error if the operand itself cannot be resolved or stat'd.
/// Failures on entries found below a listable operand are logged and
/// skipped instead, so one unreadable file does not cut the listing short.
pub fn list_operand<W: Write>(operand: &Path, options: &ListOptions, out: &mut W) -> Result<()> {
    let path = absolutize(operand)?;
    let meta = fs::symlink_metadata(&path)
        .with_context(|| format!("failed to read metadata of {}", path.display()))?;

    if options.recursive {
        // A symlink operand is never walked through, even when it points at
        // a directory; it prints as the single entry it is.
        if meta.is_dir() {
            walk_tree(&path, |entry| print_path(entry, options, &mut *out));
            Ok(())
        } else {
            print_entry(&path, &meta, options, out)
        }
    } else {
        match classify::classify(&path, &meta)? {
            ListingMode::Contents => list_children(&path, options, out),
            ListingMode::Single => print_entry(&path, &meta, options, out),
        }
    }
}

/// Builds the file system walker for recursive listings.
///
/// Listing is the inverse of searching: nothing is filtered. Hidden entries
/// are kept and every ignore-file mechanism is turned off, so the walk sees
/// exactly what the tree contains. Symlinks are reported but not followed.
fn build_walk(root: &Path) -> ignore::Walk {
    let mut builder = WalkBuilder::new(root);

    builder.hidden(false); // keep dotfiles
    builder.ignore(false); // Turn off all ignore logic
    builder.git_ignore(false);
    builder.git_global(false); // Don't use global git ignore
    builder.git_exclude(false); // Don't use git exclude files
    builder.follow_links(false);

    builder.build()
}

/// Walks the subtree rooted at `root` depth-first and hands every visited
/// path to `visit`, the root included. An unreadable entry or a failed
/// visit is logged and skipped; the walk itself always runs to the end.
fn walk_tree<F>(root: &Path, mut visit: F)
where
    F: FnMut(&Path) -> Result<()>,
{
    for result in build_walk(root) {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                log_with_context(
                    Level::Warn,
                    LogMessage {
                        message: format!("Error walking directory: {}", err),
                        module: "list",
                        context: Some(vec![("root", root.display().to_string())]),
                    },
                );
                continue;
            }
        };

        if let Err(err) = visit(entry.path()) {
            log_with_context(
                Level::Warn,
                LogMessage {
                    message: format!("Skipping entry: {:#}", err),
                    module: "list",
                    context: Some(vec![("path", entry.path().display().to_string())]),
                },
            );
        }
    }
}

/// Prints one line for each immediate child of `dir`.
///
/// The directory itself is not printed. Children appear in the order the
/// platform returns them. Reading the directory is fatal; failures on
/// individual children are logged and skipped.
fn list_children<W: Write>(dir: &Path, options: &ListOptions, out: &mut W) -> Result<()> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read directory {}", dir.display()))?;

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log_with_context(
                    Level::Warn,
                    LogMessage {
                        message: format!("Error reading directory entry: {}", err),
                        module: "list",
                        context: Some(vec![("dir", dir.display().to_string())]),
                    },
                );
                continue;
            }
        };

        // Joining the raw file name onto the operand path keeps listings
        // through a symlinked directory under the operand's own path.
        let path = dir.join(entry.file_name());

        let meta = match fs::symlink_metadata(&path) {
            Ok(meta) => meta,
            Err(err) => {
                log_with_context(
                    Level::Warn,
                    LogMessage {
                        message: format!("Skipping entry: {}", err),
                        module: "list",
                        context: Some(vec![("path", path.display().to_string())]),
                    },
                );
                continue;
            }
        };

        if let Err(err) = print_entry(&path, &meta, options, out) {
            log_with_context(
                Level::Warn,
                LogMessage {
                    message: format!("Skipping entry: {:#}", err),
                    module: "list",
                    context: Some(vec![("path", path.display().to_string())]),
                },
            );
        }
    }

    Ok(())
}

/// Stats `path` without following links, then prints its line.
fn print_path<W: Write>(path: &Path, options: &ListOptions, out: &mut W) -> Result<()> {
    let meta = fs::symlink_metadata(path)
        .with_context(|| format!("failed to read metadata of {}", path.display()))?;
    print_entry(path, &meta, options, out)
}

/// Renders one entry and writes its line to `out`.
fn print_entry<W: Write>(
    path: &Path,
    meta: &Metadata,
    options: &ListOptions,
    out: &mut W,
) -> Result<()> {
    let record = FileRecord::read(path.to_path_buf(), meta, options.show_symlink)?;
    let line = format_record(&record, options)?;
    writeln!(out, "{}", line).context("failed to write to the output stream")?;
    Ok(())
}
