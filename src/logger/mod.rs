//! Structured, tag-based logging for nodepulse
//!
//! This module provides a small ergonomic logging API with:
//! - Standard log levels (Error/Warning/Info/Debug/Verbose)
//! - Per-component debug control via `--debug <tag>,...`
//! - Dual output: colored console + optional file persistence
//!
//! ## Usage
//!
//! ```rust
//! use nodepulse::logger::{self, LogTag};
//!
//! logger::error(LogTag::Rpc, "Connection refused");
//! logger::warning(LogTag::Aggregator, "getblockchaininfo failed");
//! logger::info(LogTag::System, "Dashboard started");
//! logger::debug(LogTag::Cache, "Cache hit"); // Only with --debug cache
//! logger::verbose(LogTag::Rpc, "Raw response: ..."); // Only if --verbose
//! ```
//!
//! ## Initialization
//!
//! Call once at startup, before the first log line, with the settings taken
//! from the command line:
//! ```rust
//! nodepulse::logger::init(nodepulse::logger::LoggerConfig::default());
//! ```

mod config;
mod core;
mod file;
mod format;
mod levels;
mod tags;

pub use config::{get_logger_config, set_logger_config, LoggerConfig};
pub use levels::LogLevel;
pub use tags::LogTag;

/// Initialize the logger system
///
/// Installs `config` and opens the log file when one is configured.
pub fn init(config: LoggerConfig) {
    let file_path = config.file_path.clone();
    set_logger_config(config);

    if let Some(path) = file_path {
        file::init_file_logging(&path);
    }
}

/// Log at ERROR level (always shown)
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level (shown unless --quiet raises the threshold)
pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level (standard operations)
pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level
///
/// Only shown when the tag was passed to `--debug`.
///
/// # Example
/// ```rust
/// // Only shown with --debug rpc
/// nodepulse::logger::debug(nodepulse::logger::LogTag::Rpc, "getpeerinfo took 12ms");
/// ```
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}

/// Log at VERBOSE level (--verbose or --verbose-tags <tag>)
pub fn verbose(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Verbose, message);
}

/// Check whether debug output is enabled for a tag
///
/// Lets callers skip building expensive debug messages.
pub fn is_debug_enabled(tag: LogTag) -> bool {
    core::should_log(&tag, LogLevel::Debug)
}

/// Force flush all pending log writes
///
/// Call this during shutdown to ensure all logs are written to disk.
pub fn flush() {
    file::flush_file_logging();
}
