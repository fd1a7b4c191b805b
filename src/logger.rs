//! The logger context object
//!
//! A [`Logger`] owns an append-mode sink, a private `tracing` dispatcher that
//! renders records into it, and the pending notice buffer. Every emit call
//! is best effort: write failures are dropped so logging never changes the
//! caller's control flow.

use std::backtrace::Backtrace;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::Dispatch;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Layer;

use crate::error::{LogError, Result};
use crate::field::Field;
use crate::format::{self, lock_writer, LogfmtLayer, SharedWriter};
use crate::level::{Level, Severity};
use crate::notice::{NoticeBuffer, NOTICE_MESSAGE};
use crate::options::Options;

/// Upper bound on the captured stack trace text (64 MiB)
pub const MAX_STACK_TRACE_BYTES: usize = 64 << 20;

/// Exit status used by [`Logger::fatal`]
pub const FATAL_EXIT_CODE: i32 = 1;

/// Leveled logger writing logfmt records to a single sink
pub struct Logger {
    dispatch: Dispatch,
    writer: SharedWriter,
    path: Option<PathBuf>,
    add_source: bool,
    notices: NoticeBuffer,
    exit: fn(i32) -> !,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("path", &self.path)
            .field("add_source", &self.add_source)
            .field("pending_notices", &self.notices.len())
            .finish_non_exhaustive()
    }
}

impl Logger {
    /// Create the log directory, open `<log_dir>/<project_name>.log` for
    /// appending and build a logger over it
    pub fn init(options: Options) -> Result<Self> {
        let options = options.with_defaults();

        fs::create_dir_all(&options.log_dir).map_err(|source| LogError::CreateDir {
            path: options.log_dir.clone(),
            source,
        })?;

        let log_path = options.log_path();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .map_err(|source| LogError::OpenFile {
                path: log_path.clone(),
                source,
            })?;

        tracing::debug!(path = %log_path.display(), level = %options.level, "log file opened");

        let mut logger = Self::from_writer(options.level, options.add_source, file);
        logger.path = Some(log_path);
        Ok(logger)
    }

    /// Build a logger over any writer
    pub fn from_writer(level: Level, add_source: bool, writer: impl Write + Send + 'static) -> Self {
        let boxed: Box<dyn Write + Send> = Box::new(writer);
        let writer: SharedWriter = Arc::new(Mutex::new(boxed));
        let layer = LogfmtLayer::new(Arc::clone(&writer)).with_filter(level.as_filter());
        let subscriber = tracing_subscriber::registry().with(layer);

        Self {
            dispatch: Dispatch::new(subscriber),
            writer,
            path: None,
            add_source,
            notices: NoticeBuffer::new(),
            exit: std::process::exit,
        }
    }

    /// Replace the action `fatal` ends with; it must not return
    pub fn with_exit(mut self, exit: fn(i32) -> !) -> Self {
        self.exit = exit;
        self
    }

    /// Path of the log file, if this logger was opened by [`Logger::init`]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Dispatcher that renders into this logger's sink
    ///
    /// Installing it (for example with `tracing::dispatcher::set_global_default`)
    /// routes ordinary `tracing` events into the same file and format.
    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// Log a debug message with key/value fields
    #[track_caller]
    pub fn debug(&self, message: &str, fields: &[Field]) {
        self.emit(Severity::Debug, message, fields, Location::caller());
    }

    /// Log an info message with key/value fields
    #[track_caller]
    pub fn info(&self, message: &str, fields: &[Field]) {
        self.emit(Severity::Info, message, fields, Location::caller());
    }

    /// Log a warning message with key/value fields
    #[track_caller]
    pub fn warn(&self, message: &str, fields: &[Field]) {
        self.emit(Severity::Warn, message, fields, Location::caller());
    }

    /// Log an error message with key/value fields
    #[track_caller]
    pub fn error(&self, message: &str, fields: &[Field]) {
        self.emit(Severity::Error, message, fields, Location::caller());
    }

    /// Log a debug message built from format arguments
    #[track_caller]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.emit(Severity::Debug, &args.to_string(), &[], Location::caller());
    }

    /// Log an info message built from format arguments
    #[track_caller]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.emit(Severity::Info, &args.to_string(), &[], Location::caller());
    }

    /// Log a warning built from format arguments
    #[track_caller]
    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.emit(Severity::Warn, &args.to_string(), &[], Location::caller());
    }

    /// Log an error built from format arguments
    #[track_caller]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.emit(Severity::Error, &args.to_string(), &[], Location::caller());
    }

    /// Write a `FATAL` record with the error and current stack trace, flush
    /// the sink and terminate with exit status 1
    #[track_caller]
    pub fn fatal(&self, message: &str, err: &dyn fmt::Display) -> ! {
        let fields = [
            Field::new("error", err),
            Field::new("stacktrace", capture_stack_trace()),
        ];
        self.emit(Severity::Fatal, message, &fields, Location::caller());
        self.sync();
        (self.exit)(FATAL_EXIT_CODE)
    }

    /// Queue a pair for the next notice record
    pub fn push_notice(&self, key: impl Into<String>, value: impl fmt::Display) {
        self.notices.push(Field::new(key, value));
    }

    /// Pairs queued since the last flush
    pub fn pending_notices(&self) -> Vec<Field> {
        self.notices.snapshot()
    }

    /// Write every queued pair as one `NoticeKV` record and clear the queue
    ///
    /// Does nothing when the queue is empty.
    #[track_caller]
    pub fn flush(&self) {
        let entries = self.notices.take();
        if entries.is_empty() {
            return;
        }
        self.emit(Severity::Notice, NOTICE_MESSAGE, &entries, Location::caller());
    }

    /// Flush buffered bytes in the underlying sink
    pub fn sync(&self) {
        let _ = lock_writer(&self.writer).flush();
    }

    fn emit(&self, severity: Severity, message: &str, fields: &[Field], caller: &Location<'_>) {
        let source = if self.add_source {
            format!("{}:{}", caller.file(), caller.line())
        } else {
            String::new()
        };
        let rendered = format::render_fields(fields);

        tracing::dispatcher::with_default(&self.dispatch, || {
            macro_rules! record {
                ($level:expr) => {
                    tracing::event!(
                        target: format::RECORD_TARGET,
                        $level,
                        noticelog.severity = severity.as_str(),
                        noticelog.source = source.as_str(),
                        noticelog.fields = rendered.as_str(),
                        "{}",
                        message
                    )
                };
            }

            match severity {
                Severity::Debug => record!(tracing::Level::DEBUG),
                Severity::Info | Severity::Notice => record!(tracing::Level::INFO),
                Severity::Warn => record!(tracing::Level::WARN),
                Severity::Error | Severity::Fatal => record!(tracing::Level::ERROR),
            }
        });
    }
}

fn capture_stack_trace() -> String {
    let mut trace = Backtrace::force_capture().to_string();
    truncate_at_char_boundary(&mut trace, MAX_STACK_TRACE_BYTES);
    trace
}

fn truncate_at_char_boundary(text: &mut String, max_bytes: usize) {
    if text.len() <= max_bytes {
        return;
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text.truncate(end);
}
