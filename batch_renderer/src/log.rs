//! Renderer logging
//!
//! Every component reports through one process-wide [`Logger`]. The default
//! prints coloured, timestamped lines; tests and host applications swap in
//! their own sink with [`set_logger`]. Entries below the threshold set by
//! [`set_min_severity`] are dropped before reaching the sink.
//!
//! Components log through the `batch_*` macros with a source tag such as
//! `"batch::Renderer"`. Errors carry the file and line of the call site.

use colored::*;
use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use chrono::{DateTime, Local};

/// Destination for log entries
///
/// ```no_run
/// use batch_renderer::batch::log::{Logger, LogEntry};
///
/// struct Console;
///
/// impl Logger for Console {
///     fn log(&self, entry: &LogEntry) {
///         eprintln!("{}: {}", entry.source, entry.message);
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    fn log(&self, entry: &LogEntry);
}

/// One log record
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub severity: LogSeverity,
    pub timestamp: SystemTime,
    /// Component tag, e.g. `"batch::Renderer"`
    pub source: String,
    pub message: String,
    /// Call site, set for errors only
    pub file: Option<&'static str>,
    pub line: Option<u32>,
}

/// Log severity, ordered from most to least verbose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    /// Per scene and per flush chatter
    Trace,
    Debug,
    Info,
    Warn,
    /// Aborted scenes and backend failures
    Error,
}

impl LogSeverity {
    /// Fixed-width label used by [`DefaultLogger`]
    pub fn label(self) -> &'static str {
        match self {
            LogSeverity::Trace => "TRACE",
            LogSeverity::Debug => "DEBUG",
            LogSeverity::Info => "INFO ",
            LogSeverity::Warn => "WARN ",
            LogSeverity::Error => "ERROR",
        }
    }
}

/// Coloured console logger
///
/// Warnings and errors go to stderr, everything else to stdout.
pub struct DefaultLogger;

impl DefaultLogger {
    /// `[timestamp] [SEVERITY] [source] message`, with `(file:line)` appended
    /// when the entry carries a call site
    pub fn format(entry: &LogEntry) -> String {
        let datetime: DateTime<Local> = entry.timestamp.into();
        let label = entry.severity.label();
        let severity = match entry.severity {
            LogSeverity::Trace => label.bright_black(),
            LogSeverity::Debug => label.cyan(),
            LogSeverity::Info => label.green(),
            LogSeverity::Warn => label.yellow(),
            LogSeverity::Error => label.red().bold(),
        };

        let mut line = format!(
            "[{}] [{}] [{}] {}",
            datetime.format("%H:%M:%S%.3f"),
            severity,
            entry.source.bright_blue(),
            entry.message
        );
        if let (Some(file), Some(number)) = (entry.file, entry.line) {
            line.push_str(&format!(" ({}:{})", file, number));
        }
        line
    }
}

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        let line = Self::format(entry);
        if entry.severity >= LogSeverity::Warn {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }
}

// ===== GLOBAL LOGGER =====

struct GlobalLogger {
    sink: Box<dyn Logger>,
    min_severity: LogSeverity,
}

impl GlobalLogger {
    fn new() -> Self {
        Self { sink: Box::new(DefaultLogger), min_severity: LogSeverity::Trace }
    }
}

static GLOBAL: OnceLock<RwLock<GlobalLogger>> = OnceLock::new();

fn global() -> &'static RwLock<GlobalLogger> {
    GLOBAL.get_or_init(|| RwLock::new(GlobalLogger::new()))
}

/// Route all further entries to `sink`
pub fn set_logger<L: Logger + 'static>(sink: L) {
    if let Ok(mut global) = global().write() {
        global.sink = Box::new(sink);
    }
}

/// Restore [`DefaultLogger`] and let every severity through again
pub fn reset_logger() {
    if let Ok(mut global) = global().write() {
        *global = GlobalLogger::new();
    }
}

/// Drop entries less severe than `severity`
pub fn set_min_severity(severity: LogSeverity) {
    if let Ok(mut global) = global().write() {
        global.min_severity = severity;
    }
}

pub fn min_severity() -> LogSeverity {
    global().read().map(|g| g.min_severity).unwrap_or(LogSeverity::Trace)
}

fn dispatch(severity: LogSeverity, source: &str, message: String, site: Option<(&'static str, u32)>) {
    let Ok(global) = global().read() else {
        return;
    };
    if severity < global.min_severity {
        return;
    }
    global.sink.log(&LogEntry {
        severity,
        timestamp: SystemTime::now(),
        source: source.to_string(),
        message,
        file: site.map(|(file, _)| file),
        line: site.map(|(_, line)| line),
    });
}

/// Log without call site (backs the `batch_*` macros)
pub fn log(severity: LogSeverity, source: &str, message: String) {
    dispatch(severity, source, message, None);
}

/// Log with call site (backs `batch_error!`)
pub fn log_detailed(
    severity: LogSeverity,
    source: &str,
    message: String,
    file: &'static str,
    line: u32,
) {
    dispatch(severity, source, message, Some((file, line)));
}

// ===== LOGGING MACROS =====

#[doc(hidden)]
#[macro_export]
macro_rules! __batch_log {
    ($severity:ident, $source:expr, $($arg:tt)*) => {
        $crate::log::log($crate::log::LogSeverity::$severity, $source, format!($($arg)*))
    };
}

/// ```ignore
/// batch_trace!("batch::Renderer", "Scene opened ({:?})", kind);
/// ```
#[macro_export]
macro_rules! batch_trace {
    ($source:expr, $($arg:tt)*) => { $crate::__batch_log!(Trace, $source, $($arg)*) };
}

#[macro_export]
macro_rules! batch_debug {
    ($source:expr, $($arg:tt)*) => { $crate::__batch_log!(Debug, $source, $($arg)*) };
}

#[macro_export]
macro_rules! batch_info {
    ($source:expr, $($arg:tt)*) => { $crate::__batch_log!(Info, $source, $($arg)*) };
}

#[macro_export]
macro_rules! batch_warn {
    ($source:expr, $($arg:tt)*) => { $crate::__batch_log!(Warn, $source, $($arg)*) };
}

/// Error entry stamped with the caller's `file!()` and `line!()`
#[macro_export]
macro_rules! batch_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::log::log_detailed(
            $crate::log::LogSeverity::Error,
            $source,
            format!($($arg)*),
            file!(),
            line!()
        )
    };
}

/// Log an error and evaluate to `Error::BackendError` with the same text
///
/// ```ignore
/// let err = batch_err!("batch::Mock", "buffer {} is read-only", id);
/// ```
#[macro_export]
macro_rules! batch_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::batch_error!($source, "{}", message);
        $crate::batch::Error::BackendError(message)
    }};
}

/// `return Err(batch_err!(..))`
#[macro_export]
macro_rules! batch_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::batch_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
