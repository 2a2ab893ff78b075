#![deny(missing_docs)]
//! Shared logging utilities for the recipe workspace.
//!
//! This crate provides the `recipe_*` logging macros used across the codebase,
//! the terminal/file initializer used by the app, and a minimal test
//! initializer for the global logger.

use std::fs::File;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Default log file, relative to the current working directory.
pub const DEFAULT_LOG_FILE: &str = "./recipe.log";

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! recipe_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! recipe_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! recipe_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! recipe_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! recipe_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogDestination {
    /// Write to the log file only.
    File,
    /// Write to the terminal (stderr for warnings and errors).
    Terminal,
    /// Write to both file and terminal.
    Both,
}

/// Initialize the global logger with the specified destination and level.
///
/// File output goes to [`DEFAULT_LOG_FILE`]. A failure to create the file is
/// reported on stderr and the remaining destinations are still installed.
pub fn initialize(destination: LogDestination, level: LevelFilter) {
    initialize_with_path(destination, level, Path::new(DEFAULT_LOG_FILE));
}

/// Same as [`initialize`] but writes file output to `log_path`.
pub fn initialize_with_path(destination: LogDestination, level: LevelFilter, log_path: &Path) {
    let config = build_config();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if matches!(destination, LogDestination::Terminal | LogDestination::Both) {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }
    if matches!(destination, LogDestination::File | LogDestination::Both) {
        if let Some(file_logger) = create_file_logger(level, config, log_path.to_path_buf()) {
            loggers.push(file_logger);
        }
    }
    if loggers.is_empty() {
        return;
    }

    let _ = CombinedLogger::init(loggers);
}

/// Parse a destination name: `file`, `terminal` or `both`, in any case.
pub fn parse_destination(name: &str) -> Option<LogDestination> {
    match name.trim().to_ascii_lowercase().as_str() {
        "file" => Some(LogDestination::File),
        "terminal" => Some(LogDestination::Terminal),
        "both" => Some(LogDestination::Both),
        _ => None,
    }
}

/// Parse a level name such as `"debug"` or `"WARN"`; unknown names yield `None`.
pub fn parse_level(name: &str) -> Option<LevelFilter> {
    name.trim().parse::<LevelFilter>().ok()
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn create_file_logger(
    level: LevelFilter,
    config: Config,
    log_path: PathBuf,
) -> Option<Box<WriteLogger<File>>> {
    match File::create(&log_path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", log_path, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_level_accepts_any_case() {
        assert_eq!(parse_level("debug"), Some(LevelFilter::Debug));
        assert_eq!(parse_level(" WARN "), Some(LevelFilter::Warn));
        assert_eq!(parse_level("chatty"), None);
    }

    #[test]
    fn parse_destination_accepts_known_names() {
        assert_eq!(parse_destination("file"), Some(LogDestination::File));
        assert_eq!(parse_destination(" Terminal"), Some(LogDestination::Terminal));
        assert_eq!(parse_destination("BOTH"), Some(LogDestination::Both));
        assert_eq!(parse_destination("syslog"), None);
    }

    #[test]
    fn file_destination_writes_to_given_path() {
        let path = std::env::temp_dir().join(format!("recipe-log-{}.log", std::process::id()));

        initialize_with_path(LogDestination::File, LevelFilter::Info, &path);

        assert!(path.exists());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_initializer_is_idempotent() {
        initialize_for_tests();
        initialize_for_tests();
        recipe_info!("logger initialized twice without panicking");
    }
}
