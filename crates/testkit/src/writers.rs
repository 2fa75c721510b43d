//! Writer doubles.

use crate::errors::{sink_error, transient_sink_error};
use effect_log_domain::LogEntry;
use effect_log_ports::LogWriter;
use effect_log_shared::{ErrorEnvelope, Result};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Keeps a copy of every entry it receives, in arrival order.
#[derive(Debug, Default)]
pub struct RecordingWriter {
    entries: Mutex<Vec<LogEntry>>,
    flushes: AtomicUsize,
}

impl RecordingWriter {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of received entries.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().expect("recording writer lock").clone()
    }

    /// Messages of received entries.
    pub fn messages(&self) -> Vec<String> {
        self.entries
            .lock()
            .expect("recording writer lock")
            .iter()
            .map(|entry| entry.message.clone())
            .collect()
    }

    /// Most recent entry, if any.
    pub fn last(&self) -> Option<LogEntry> {
        self.entries
            .lock()
            .expect("recording writer lock")
            .last()
            .cloned()
    }

    /// Number of received entries.
    pub fn len(&self) -> usize {
        self.entries.lock().expect("recording writer lock").len()
    }

    /// Returns true when nothing was received.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of `flush` calls received.
    pub fn flush_count(&self) -> usize {
        self.flushes.load(Ordering::SeqCst)
    }

    /// Remove and return everything received so far.
    pub fn take(&self) -> Vec<LogEntry> {
        std::mem::take(&mut *self.entries.lock().expect("recording writer lock"))
    }
}

impl LogWriter for RecordingWriter {
    fn write(&self, entry: &LogEntry) -> Result<()> {
        self.entries
            .lock()
            .expect("recording writer lock")
            .push(entry.clone());
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.flushes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Fails every write and flush, counting attempts.
#[derive(Debug)]
pub struct FailingWriter {
    message: String,
    retriable: bool,
    attempts: AtomicUsize,
}

impl FailingWriter {
    /// Writer whose failures carry `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            retriable: false,
            attempts: AtomicUsize::new(0),
        }
    }

    /// Writer whose failures are retriable.
    pub fn transient(message: impl Into<String>) -> Self {
        Self {
            retriable: true,
            ..Self::new(message)
        }
    }

    fn failure(&self) -> ErrorEnvelope {
        if self.retriable {
            transient_sink_error(&self.message)
        } else {
            sink_error(&self.message)
        }
    }

    /// Number of writes attempted.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl LogWriter for FailingWriter {
    fn write(&self, _entry: &LogEntry) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(self.failure())
    }

    fn flush(&self) -> Result<()> {
        Err(self.failure())
    }
}
