//! Opt-in instrumentation for navigators and file loads.
//!
//! [`scope`] times a block and reports through `tracing` once enabled.
//! [`event`] builds a named event with `key=value` fields; events go to
//! `tracing` at debug level under the `linewise::perf` target and, when a
//! debug log path is set, to that file with a timestamp.

use std::fmt::{self, Write as _};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

const TARGET: &str = "linewise::perf";

static ENABLED: AtomicBool = AtomicBool::new(false);
static EVENT_LOG: LazyLock<Mutex<EventLog>> = LazyLock::new(|| Mutex::new(EventLog::closed()));

/// Timer that reports its elapsed time when dropped.
#[derive(Debug)]
pub struct Scope {
    name: &'static str,
    start: Instant,
}

impl Drop for Scope {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        if is_enabled() {
            tracing::info!(target: TARGET, scope = self.name, elapsed_ms, "timing");
        }
        event(self.name)
            .field("elapsed_ms", format_args!("{elapsed_ms:.3}"))
            .emit();
    }
}

/// A named event under construction. Fields are only formatted when
/// something is listening.
#[derive(Debug)]
pub struct Event {
    name: &'static str,
    fields: Option<String>,
}

impl Event {
    /// Append `key=value`.
    pub fn field(mut self, key: &str, value: impl fmt::Display) -> Self {
        if let Some(fields) = self.fields.as_mut() {
            if !fields.is_empty() {
                fields.push(' ');
            }
            let _ = write!(fields, "{key}={value}");
        }
        self
    }

    /// Send the event to `tracing` and the debug log.
    pub fn emit(self) {
        let Some(fields) = self.fields else {
            return;
        };
        tracing::debug!(target: TARGET, event = self.name, "{fields}");
        log().write(self.name, &fields);
    }
}

#[derive(Debug)]
struct EventLog {
    start: Instant,
    writer: Option<BufWriter<File>>,
}

impl EventLog {
    fn closed() -> Self {
        Self {
            start: Instant::now(),
            writer: None,
        }
    }

    fn write(&mut self, name: &str, fields: &str) {
        let elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        if let Some(writer) = self.writer.as_mut() {
            let _ = writeln!(writer, "[{elapsed_ms:>10.3} ms] {name} {fields}");
            let _ = writer.flush();
        }
    }
}

// The log holds no invariants a panicking writer could break.
fn log() -> MutexGuard<'static, EventLog> {
    EVENT_LOG.lock().unwrap_or_else(PoisonError::into_inner)
}

pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

pub fn scope(name: &'static str) -> Scope {
    Scope {
        name,
        start: Instant::now(),
    }
}

/// Start building an event called `name`.
pub fn event(name: &'static str) -> Event {
    let listening = is_debug_log_enabled() || tracing::enabled!(target: TARGET, tracing::Level::DEBUG);
    Event {
        name,
        fields: listening.then(String::new),
    }
}

/// Start (or with `None`, stop) writing events to `path`.
///
/// # Errors
/// Returns an error if the log file cannot be created or written.
pub fn set_debug_log_path(path: Option<&Path>) -> std::io::Result<()> {
    let mut log = log();
    log.writer = None;
    if let Some(path) = path {
        let mut writer = BufWriter::new(File::create(path)?);
        writeln!(writer, "linewise event log: {}", path.display())?;
        writer.flush()?;
        log.start = Instant::now();
        log.writer = Some(writer);
    }
    Ok(())
}

pub fn is_debug_log_enabled() -> bool {
    log().writer.is_some()
}
