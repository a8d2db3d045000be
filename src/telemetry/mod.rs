//! Telemetry and logging configuration using env_logger.
//!
//! This module sets up the diagnostic channel of the program: every log line
//! goes to stderr, prefixed with a compact UTC timestamp, and is never mixed
//! into the listing output on stdout.

use anyhow::Result;
use chrono::{DateTime, Datelike, Timelike, Utc};
use log::{Level, error, info, warn};
use std::io::Write;
use std::sync::Once;

static INIT: Once = Once::new();

/// Log message with context
pub struct LogMessage {
    /// The message to log
    pub message: String,

    /// The module where the log originated
    pub module: &'static str,

    /// Optional key-value pairs of additional context
    pub context: Option<Vec<(&'static str, String)>>,
}

/// Initialize env_logger-based logging with stderr output
///
/// Diagnostics are formatted as `<stamp> <message>` where the stamp is the
/// compact UTC form produced by [`stamp`]. The filter is fixed at `Warn` so
/// that entry-level warnings and operand errors always reach stderr while
/// informational chatter stays out of the stream.
///
/// # Returns
///
/// A Result indicating success or failure of the initialization
pub fn init() -> Result<()> {
    let mut result = Ok(());

    INIT.call_once(|| {
        match setup_logger() {
            Ok(_) => {
                // Suppressed by the Warn filter; kept for debug builds that
                // lower the filter by hand.
                info!("Logging initialized with stderr output");
            }
            Err(e) => {
                // Cannot use logging yet since it failed to initialize
                eprintln!("Failed to initialize logging: {}", e);
                result = Err(e);
            }
        }
    });

    result
}

/// Renders the diagnostic timestamp: year (mod 1000), month and day, hour
/// and minute, as `yyy:MMdd:HHmm`. For example `026:0826:1530`.
pub fn stamp(t: DateTime<Utc>) -> String {
    format!(
        "{:03}:{:02}{:02}:{:02}{:02}",
        t.year() % 1000,
        t.month(),
        t.day(),
        t.hour(),
        t.minute()
    )
}

/// Log a message with the given level and context
///
/// # Arguments
///
/// * `level` - The log level to use
/// * `msg` - The log message with context
///
/// # Example
///
/// ```
/// use lustra::telemetry::{log_with_context, LogMessage};
/// use log::Level;
///
/// log_with_context(
///     Level::Warn,
///     LogMessage {
///         message: "Skipping unreadable entry".to_string(),
///         module: "list",
///         context: Some(vec![("path", "/path/to/file.txt".to_string())]),
///     }
/// );
/// ```
pub fn log_with_context(level: Level, msg: LogMessage) {
    match level {
        Level::Error => {
            error!(target: msg.module, "{}", format_context(&msg));
        }
        Level::Warn => {
            warn!(target: msg.module, "{}", format_context(&msg));
        }
        Level::Info => {
            info!(target: msg.module, "{}", format_context(&msg));
        }
        Level::Debug => {
            log::debug!(target: msg.module, "{}", format_context(&msg));
        }
        Level::Trace => {
            log::trace!(target: msg.module, "{}", format_context(&msg));
        }
    }
}

/// Format a log message with its context for display
fn format_context(msg: &LogMessage) -> String {
    if let Some(context) = &msg.context {
        let context_str = context
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(", ");

        format!("{} [{}]", msg.message, context_str)
    } else {
        msg.message.clone()
    }
}

/// Set up the logging pipeline
fn setup_logger() -> Result<()> {
    env_logger::Builder::new()
        .filter(None, log::LevelFilter::Warn)
        .format(|buf, record| writeln!(buf, "{} {}", stamp(Utc::now()), record.args()))
        .init();

    Ok(())
}

#[cfg(test)]
mod tests;
