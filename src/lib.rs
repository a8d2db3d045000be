//! # Lustra
//!
//! Lustra is a small utility for listing local files with their metadata.
//!
//! ## Features
//!
//! * Personality modes - the invocation name (`ls`, `lsr`, `lt`, `lr`, `ll`, `llr`)
//!   selects a default set of metadata columns
//! * Metadata columns - symlink target, permission mode, owner, size,
//!   modification time, and a content identifier of the file bytes
//! * Recursive walks - depth-first traversal that logs and skips unreadable
//!   entries instead of aborting

/// Content identifiers for file bytes (CIDv1, raw codec, sha2-256)
pub mod cid;
/// Per-entry metadata snapshots and line rendering
pub mod format;
/// Directory listing and recursive traversal
pub mod list;
/// Invocation-name profiles and argument resolution
pub mod options;
/// Path normalization utilities
pub mod paths;
/// Logging configuration with timestamped stderr diagnostics
pub mod telemetry;
