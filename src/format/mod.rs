//! Per-entry metadata snapshots and line rendering.
//!
//! One visited filesystem entry becomes one [`FileRecord`] and one
//! tab-separated output line. The field order and the `label:value` forms
//! are a stable contract for consumers scripting against the output.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs::Metadata;
use std::path::{MAIN_SEPARATOR, PathBuf};
use std::time::SystemTime;

use crate::cid;
use crate::options::ListOptions;

/// Snapshot of one filesystem entry, taken from a link-aware stat.
///
/// Ephemeral: built immediately before formatting and dropped once the line
/// is written.
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// Absolute path of the entry as it is listed.
    pub path: PathBuf,

    /// The entry itself is a directory (never true for a symlink to one).
    pub is_dir: bool,

    /// The entry itself is a symlink.
    pub is_symlink: bool,

    /// Permission bits, masked to 0o777.
    pub mode: u32,

    /// Owner user id; -1 where the platform has no POSIX ownership.
    pub uid: i64,

    /// Owner group id; -1 where the platform has no POSIX ownership.
    pub gid: i64,

    /// Size in bytes.
    pub size: u64,

    /// Modification time.
    pub modified: SystemTime,

    /// Link target, read only when the symlink column is enabled.
    pub link_target: Option<PathBuf>,
}

impl FileRecord {
    /// Builds a record from a path and its link-aware metadata.
    ///
    /// The link target is read only when `read_link_target` is set and the
    /// entry is a symlink, so a broken readlink can fail an entry only when
    /// the symlink column is actually enabled.
    pub fn read(path: PathBuf, meta: &Metadata, read_link_target: bool) -> Result<Self> {
        let link_target = if read_link_target && meta.is_symlink() {
            let target = std::fs::read_link(&path)
                .with_context(|| format!("failed to read link {}", path.display()))?;
            Some(target)
        } else {
            None
        };

        let (uid, gid) = owner_ids(meta);

        Ok(Self {
            is_dir: meta.is_dir(),
            is_symlink: meta.is_symlink(),
            mode: permission_bits(meta),
            uid,
            gid,
            size: meta.len(),
            modified: meta.modified().unwrap_or(SystemTime::UNIX_EPOCH),
            link_target,
            path,
        })
    }
}

/// Renders one output line for a record under the active options.
///
/// `Result` because the content-identifier column reads the file; any other
/// column renders from the snapshot alone. A hashing failure abandons the
/// whole line so that partial records never reach stdout.
pub fn format_record(record: &FileRecord, options: &ListOptions) -> Result<String> {
    let mut line = escape_name(&record.path.to_string_lossy());
    if record.is_dir {
        line.push(MAIN_SEPARATOR);
    }

    if options.show_symlink && record.is_symlink {
        if let Some(target) = &record.link_target {
            line.push_str(&format!("\tsymlink:{}", target.display()));
        }
    }

    if options.show_mode {
        line.push_str(&format!("\tmode:{:04o}", record.mode));
    }

    if options.show_owner {
        line.push_str(&format!("\towner:{}/{}", record.uid, record.gid));
    }

    if options.show_size {
        if record.is_dir {
            line.push_str("\tsize:dir");
        } else if record.is_symlink {
            // The target's size is never consulted.
            line.push_str("\tsize:symlink");
        } else {
            line.push_str(&format!("\tsize:{}", group_thousands(record.size)));
        }
    }

    if options.show_time {
        line.push_str(&format!("\tmtime:{}", mtime_stamp(record.modified)));
    }

    if options.show_cid && !record.is_dir && !record.is_symlink {
        let cid = cid::file_cid(&record.path)?;
        line.push_str(&format!("\tcid:{}", cid));
    }

    Ok(line)
}

/// Escapes embedded tab characters so the line stays one tab-delimited
/// record.
fn escape_name(name: &str) -> String {
    name.replace('\t', "\\\t")
}

/// Groups a byte count with a radix-1000 `.` separator: 1234567 becomes
/// `1.234.567`. The separator is fixed, never localized.
pub fn group_thousands(value: u64) -> String {
    if value < 1000 {
        value.to_string()
    } else {
        format!("{}.{:03}", group_thousands(value / 1000), value % 1000)
    }
}

/// Modification time in compact UTC form: 2-digit year, month+day,
/// hour+minute.
fn mtime_stamp(modified: SystemTime) -> String {
    let utc: DateTime<Utc> = modified.into();
    utc.format("%y.%m%d.%H%M").to_string()
}

#[cfg(unix)]
fn owner_ids(meta: &Metadata) -> (i64, i64) {
    use std::os::unix::fs::MetadataExt;
    (i64::from(meta.uid()), i64::from(meta.gid()))
}

/// Ownership sentinel for platforms without POSIX uid/gid.
#[cfg(not(unix))]
fn owner_ids(_meta: &Metadata) -> (i64, i64) {
    (-1, -1)
}

#[cfg(unix)]
fn permission_bits(meta: &Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o777
}

#[cfg(not(unix))]
fn permission_bits(meta: &Metadata) -> u32 {
    if meta.permissions().readonly() {
        0o444
    } else {
        0o644
    }
}
