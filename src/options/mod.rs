//! Invocation-name profiles and argument resolution.
//!
//! The binary behaves differently depending on the name it was invoked as:
//! each recognized name seeds a default set of display toggles, and a run of
//! leading flags then adjusts them. Everything after the first non-flag
//! argument is a path operand.

use anyhow::{Result, bail};
use std::path::PathBuf;

/// The reserved literal that prints the crate version instead of listing.
pub const VERSION_LITERAL: &str = "version";

/// Display configuration for one run.
///
/// Built once by [`resolve_args`] before any listing starts and treated as
/// read-only afterwards; every component receives it by shared reference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Walk the whole subtree of a directory operand instead of listing its
    /// immediate children.
    pub recursive: bool,

    /// Append the link target of symlink entries.
    pub show_symlink: bool,

    /// Append the permission mode as 4-digit octal.
    pub show_mode: bool,

    /// Append the numeric owner uid/gid pair.
    pub show_owner: bool,

    /// Append the byte size (grouped), or the `dir`/`symlink` markers.
    pub show_size: bool,

    /// Append the modification time in compact UTC form.
    pub show_time: bool,

    /// Append a content identifier of the file bytes. Requires reading each
    /// regular file in full.
    pub show_cid: bool,
}

impl ListOptions {
    /// Returns the default toggles for an invocation name.
    ///
    /// Unrecognized names (including the crate's own binary name) yield the
    /// all-false default: names only, non-recursive.
    pub fn for_invocation(name: &str) -> Self {
        match name {
            "ls" => Self {
                show_symlink: true,
                show_size: true,
                ..Self::default()
            },
            "lsr" => Self {
                recursive: true,
                show_symlink: true,
                show_size: true,
                ..Self::default()
            },
            "lt" => Self {
                show_time: true,
                ..Self::default()
            },
            "lr" => Self {
                recursive: true,
                ..Self::default()
            },
            "ll" => Self {
                show_symlink: true,
                show_mode: true,
                show_owner: true,
                show_size: true,
                ..Self::default()
            },
            "llr" => Self {
                recursive: true,
                show_symlink: true,
                show_mode: true,
                show_owner: true,
                show_size: true,
                ..Self::default()
            },
            _ => Self::default(),
        }
    }

    /// Turns off every display column, leaving only the name (and the
    /// recursive toggle, which is a traversal mode rather than a column).
    fn clear_columns(&mut self) {
        self.show_symlink = false;
        self.show_mode = false;
        self.show_owner = false;
        self.show_size = false;
        self.show_time = false;
        self.show_cid = false;
    }
}

/// What a resolved argument vector asks the binary to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Print the version string and exit successfully.
    Version,

    /// List the given operands with the given display configuration.
    List {
        options: ListOptions,
        operands: Vec<PathBuf>,
    },
}

/// Resolves the invocation name and argument vector into a [`Resolution`].
///
/// `args` is the argument vector without the program name. Flags are scanned
/// from the front and the scan stops at the first token that does not start
/// with `-`; every remaining token is a path operand, hyphen-prefixed or
/// not. With no operands left, the current directory is listed.
///
/// # Errors
///
/// Fails on a hyphen-prefixed token outside the recognized flag set. The
/// caller must not produce any listing output in that case.
pub fn resolve_args(invocation: &str, args: &[String]) -> Result<Resolution> {
    if args.len() == 1 && args[0] == VERSION_LITERAL {
        return Ok(Resolution::Version);
    }

    let mut options = ListOptions::for_invocation(invocation);

    let mut rest = args;
    while let Some(arg) = rest.first() {
        if !arg.starts_with('-') {
            break;
        }
        match arg.as_str() {
            "-r" => options.recursive = true,
            "-m" => options.show_mode = true,
            "-o" => options.show_owner = true,
            "-s" => options.show_size = true,
            "-t" => options.show_time = true,
            "-c" => options.show_cid = true,
            "-l" => {
                options.show_symlink = true;
                options.show_mode = true;
                options.show_size = true;
            }
            "-1" => options.clear_columns(),
            _ => bail!("invalid option `{}`", arg),
        }
        rest = &rest[1..];
    }

    let operands = if rest.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        rest.iter().map(PathBuf::from).collect()
    };

    Ok(Resolution::List { options, operands })
}
