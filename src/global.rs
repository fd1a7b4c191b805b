//! Process-wide logger
//!
//! A single guarded [`Logger`] for code that does not want to pass a logger
//! around. [`init`] installs it and may be called again to replace it (the
//! replacement starts with an empty notice queue). Emitting before `init`
//! panics with [`LogError::NotInitialized`]; use [`try_logger`] to check.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::{LogError, Result};
use crate::field::Field;
use crate::logger::Logger;
use crate::options::Options;

static LOGGER: RwLock<Option<Arc<Logger>>> = RwLock::new(None);

/// Open the log file described by `options` and install it process-wide
pub fn init(options: Options) -> Result<()> {
    let logger = Logger::init(options)?;
    install(logger);
    Ok(())
}

/// Like [`init`], but exits with status 1 if the log file cannot be set up
pub fn init_or_abort(options: Options) {
    if let Err(err) = init(options) {
        eprintln!("noticelog: {}", err);
        std::process::exit(1);
    }
}

/// Install an already built logger, replacing any previous one
pub fn install(logger: Logger) {
    let mut slot = LOGGER.write().unwrap_or_else(PoisonError::into_inner);
    *slot = Some(Arc::new(logger));
}

/// The installed logger
pub fn try_logger() -> Result<Arc<Logger>> {
    LOGGER
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
        .ok_or(LogError::NotInitialized)
}

/// Check whether [`init`] or [`install`] has run
pub fn is_initialized() -> bool {
    try_logger().is_ok()
}

#[track_caller]
fn logger() -> Arc<Logger> {
    match try_logger() {
        Ok(logger) => logger,
        Err(err) => panic!("{}", err),
    }
}

/// Log a debug message with key/value fields through the global logger
#[track_caller]
pub fn debug(message: &str, fields: &[Field]) {
    logger().debug(message, fields);
}

/// Log an info message with key/value fields through the global logger
#[track_caller]
pub fn info(message: &str, fields: &[Field]) {
    logger().info(message, fields);
}

/// Log a warning message with key/value fields through the global logger
#[track_caller]
pub fn warn(message: &str, fields: &[Field]) {
    logger().warn(message, fields);
}

/// Log an error message with key/value fields through the global logger
#[track_caller]
pub fn error(message: &str, fields: &[Field]) {
    logger().error(message, fields);
}

/// Log a debug message built from format arguments through the global logger
#[track_caller]
pub fn debugf(args: fmt::Arguments<'_>) {
    logger().debugf(args);
}

/// Log an info message built from format arguments through the global logger
#[track_caller]
pub fn infof(args: fmt::Arguments<'_>) {
    logger().infof(args);
}

/// Log a warning message built from format arguments through the global logger
#[track_caller]
pub fn warnf(args: fmt::Arguments<'_>) {
    logger().warnf(args);
}

/// Log an error message built from format arguments through the global logger
#[track_caller]
pub fn errorf(args: fmt::Arguments<'_>) {
    logger().errorf(args);
}

/// Write a fatal record with a stack trace and terminate the process
#[track_caller]
pub fn fatal(message: &str, err: &dyn fmt::Display) -> ! {
    logger().fatal(message, err)
}

/// Queue a pair for the next notice record
#[track_caller]
pub fn push_notice(key: impl Into<String>, value: impl fmt::Display) {
    logger().push_notice(key, value);
}

/// Write the queued notice pairs as one record and clear the queue
#[track_caller]
pub fn flush() {
    logger().flush();
}

/// Log a debug message with `format!` syntax through the global logger
#[macro_export]
macro_rules! debugf {
    ($($arg:tt)*) => {
        $crate::global::debugf(format_args!($($arg)*))
    };
}

/// Log an info message with `format!` syntax through the global logger
#[macro_export]
macro_rules! infof {
    ($($arg:tt)*) => {
        $crate::global::infof(format_args!($($arg)*))
    };
}

/// Log a warning with `format!` syntax through the global logger
#[macro_export]
macro_rules! warnf {
    ($($arg:tt)*) => {
        $crate::global::warnf(format_args!($($arg)*))
    };
}

/// Log an error with `format!` syntax through the global logger
#[macro_export]
macro_rules! errorf {
    ($($arg:tt)*) => {
        $crate::global::errorf(format_args!($($arg)*))
    };
}
