//! Text record rendering
//!
//! Each event reaching a logger's subscriber becomes one logfmt line:
//!
//! ```text
//! time=2026-10-18T09:12:44.031+02:00 level=INFO msg=hello k=v
//! ```
//!
//! Records emitted through [`Logger`](crate::Logger) carry their severity,
//! caller location and pre-rendered fields in reserved `noticelog.*` fields.
//! Events from ordinary `tracing` macros have their fields rendered one by one;
//! on other targets the reserved names are treated as plain fields.

use std::fmt::{self, Write as _};
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{Local, SecondsFormat};
use tracing::field::{Field as TracingField, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use crate::field::Field;
use crate::level::Severity;

/// Target of records emitted by [`Logger`](crate::Logger); only these may
/// set the reserved fields below
pub(crate) const RECORD_TARGET: &str = "noticelog";

pub(crate) const SEVERITY_FIELD: &str = "noticelog.severity";
pub(crate) const SOURCE_FIELD: &str = "noticelog.source";
pub(crate) const FIELDS_FIELD: &str = "noticelog.fields";

/// Sink shared between a logger and its formatting layer
pub(crate) type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

pub(crate) fn lock_writer(writer: &SharedWriter) -> MutexGuard<'_, Box<dyn Write + Send>> {
    writer.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Layer that writes every event as a logfmt line
pub(crate) struct LogfmtLayer {
    writer: SharedWriter,
}

impl LogfmtLayer {
    pub(crate) fn new(writer: SharedWriter) -> Self {
        Self { writer }
    }
}

impl<S: Subscriber> Layer<S> for LogfmtLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = RecordVisitor {
            reserved: event.metadata().target() == RECORD_TARGET,
            ..Default::default()
        };
        event.record(&mut visitor);

        let severity = visitor
            .severity
            .take()
            .unwrap_or_else(|| Severity::from(event.metadata().level()).as_str().to_string());
        let line = visitor.into_line(&severity);

        // Best effort: a failing sink never reaches the caller
        let mut writer = lock_writer(&self.writer);
        let _ = writer.write_all(line.as_bytes());
        let _ = writer.flush();
    }
}

#[derive(Default)]
struct RecordVisitor {
    reserved: bool,
    message: String,
    severity: Option<String>,
    source: String,
    rendered: String,
    fields: Vec<Field>,
}

impl RecordVisitor {
    fn into_line(self, severity: &str) -> String {
        let mut line = String::with_capacity(64 + self.message.len() + self.rendered.len());
        line.push_str("time=");
        line.push_str(&Local::now().to_rfc3339_opts(SecondsFormat::Millis, false));
        line.push_str(" level=");
        line.push_str(severity);
        if !self.source.is_empty() {
            line.push_str(" source=");
            write_value(&mut line, &self.source);
        }
        line.push_str(" msg=");
        write_value(&mut line, &self.message);
        if !self.rendered.is_empty() {
            line.push(' ');
            line.push_str(&self.rendered);
        }
        if !self.fields.is_empty() {
            line.push(' ');
            line.push_str(&render_fields(&self.fields));
        }
        line.push('\n');
        line
    }
}

impl Visit for RecordVisitor {
    fn record_str(&mut self, field: &TracingField, value: &str) {
        match field.name() {
            "message" => self.message = value.to_string(),
            SEVERITY_FIELD if self.reserved => self.severity = Some(value.to_string()),
            SOURCE_FIELD if self.reserved => self.source = value.to_string(),
            FIELDS_FIELD if self.reserved => self.rendered = value.to_string(),
            name => self.fields.push(Field::new(name, value)),
        }
    }

    fn record_debug(&mut self, field: &TracingField, value: &dyn fmt::Debug) {
        self.record_str(field, &format!("{:?}", value));
    }
}

/// Render fields as space separated `key=value` pairs in order
pub fn render_fields(fields: &[Field]) -> String {
    let mut out = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        write_value(&mut out, &field.key);
        out.push('=');
        write_value(&mut out, &field.value);
    }
    out
}

/// Write a key or value, quoting it when it would break the line apart
fn write_value(out: &mut String, value: &str) {
    if needs_quoting(value) {
        let _ = write!(out, "{:?}", value);
    } else {
        out.push_str(value);
    }
}

fn needs_quoting(value: &str) -> bool {
    value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || c == '"' || c == '=')
}
