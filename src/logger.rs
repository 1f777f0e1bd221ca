use std::fs::OpenOptions;
use std::sync::Mutex;

use serde::Deserialize;
use tracing_subscriber::fmt::{format::Writer, time::FormatTime};
use tracing_subscriber::EnvFilter;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Local wall-clock time, e.g. `2024-05-01 14:03:07.123`
fn timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Stamps every log line with `timestamp()`
struct LocalTimestamp;

impl FormatTime for LocalTimestamp {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", timestamp())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    #[serde(alias = "warn")]
    Warning = 2,
    Error = 3,
}

impl LogLevel {
    fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }

    /// Directive understood by `tracing_subscriber::EnvFilter`
    fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where log lines end up for this session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Append to a file; the terminal stays free for the shop screen
    File(String),
    /// Only warnings and errors, written to stderr
    Stderr,
}

/// Picks the effective level and target.
///
/// Without a log file the operator's screen would be flooded by info lines
/// between prompts, so stderr output is clamped to warnings.
pub fn resolve_target(min_level: LogLevel, log_file: Option<&str>) -> (LogLevel, LogTarget) {
    match log_file {
        Some(path) => (min_level, LogTarget::File(path.to_string())),
        None => (min_level.max(LogLevel::Warning), LogTarget::Stderr),
    }
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level when it is set.
pub fn init_logger(min_level: LogLevel, log_file: Option<&str>) -> std::io::Result<()> {
    let (level, target) = resolve_target(min_level, log_file);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_directive()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(LocalTimestamp)
        .with_target(false);

    match target {
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        LogTarget::Stderr => {
            builder.with_writer(std::io::stderr).init();
        }
    }

    Ok(())
}
