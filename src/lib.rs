//! noticelog - leveled file logging with batched notice records
//!
//! Records are written as logfmt lines to `<log_dir>/<project_name>.log`.
//! Besides the usual levels the logger offers:
//! - a fatal path that records the error and a stack trace, then exits with status 1
//! - a notice queue: pairs pushed with `push_notice` are written together as one
//!   `NoticeKV` record by `flush`
//!
//! Use a [`Logger`] directly, or the process-wide functions re-exported from
//! [`global`]:
//!
//! ```no_run
//! use noticelog::{fields, Level, Options};
//!
//! noticelog::init(Options::new("billing").with_level(Level::Debug))?;
//! noticelog::info("hello", fields!["k" => "v"]);
//! noticelog::infof!("charged {} accounts", 3);
//!
//! noticelog::push_notice("request_id", "r-42");
//! noticelog::push_notice("status", 200);
//! noticelog::flush();
//! # Ok::<(), noticelog::LogError>(())
//! ```

pub mod error;
pub mod field;
pub mod format;
pub mod global;
pub mod level;
pub mod logger;
pub mod notice;
pub mod options;

pub use error::{LogError, Result};
pub use field::Field;
pub use global::{
    debug, debugf, error, errorf, fatal, flush, info, infof, init, init_or_abort, install,
    is_initialized, push_notice, try_logger, warn, warnf,
};
pub use level::{Level, Severity};
pub use logger::{Logger, FATAL_EXIT_CODE, MAX_STACK_TRACE_BYTES};
pub use notice::{NoticeBuffer, NOTICE_MESSAGE};
pub use options::Options;
