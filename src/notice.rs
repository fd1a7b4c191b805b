//! Notice accumulator
//!
//! Key/value pairs pushed during a unit of work are held here until the
//! logger flushes them as a single `NoticeKV` record.

use std::sync::{Mutex, PoisonError};

use crate::field::Field;

/// Message tag carried by every flushed notice record
pub const NOTICE_MESSAGE: &str = "NoticeKV";

/// Thread-safe ordered buffer of pending notice pairs
///
/// The buffer has no size bound: pairs accumulate until [`take`](Self::take)
/// drains them, so callers that push without ever flushing grow it for the
/// lifetime of the logger.
#[derive(Debug, Default)]
pub struct NoticeBuffer {
    entries: Mutex<Vec<Field>>,
}

impl NoticeBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair; duplicate keys are kept
    pub fn push(&self, field: Field) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(field);
    }

    /// Remove and return every pending pair in push order
    pub fn take(&self) -> Vec<Field> {
        std::mem::take(&mut *self.entries.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Copy of the pending pairs without draining them
    pub fn snapshot(&self) -> Vec<Field> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of pending pairs
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if nothing is pending
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
