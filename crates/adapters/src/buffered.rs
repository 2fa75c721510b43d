//! Batching writer.

use effect_log_domain::LogEntry;
use effect_log_ports::{LogWriter, SharedWriter};
use effect_log_shared::{ErrorClass, ErrorCode, ErrorEnvelope, Result};
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Mutex, PoisonError};

/// Holds entries until `capacity` are pending, then delivers them in
/// arrival order.
///
/// The lock is held across delivery, so batches reach the child in arrival
/// order even under concurrent writers. Every entry of a batch is offered to
/// the child exactly once; child failures are collected into one
/// `writer:buffered_delivery_failed` error and the buffer is cleared either
/// way. Pending entries are delivered when the writer is dropped.
pub struct BufferedWriter {
    inner: SharedWriter,
    capacity: usize,
    pending: Mutex<VecDeque<LogEntry>>,
}

impl BufferedWriter {
    /// Buffer up to `capacity` entries in front of `inner`.
    ///
    /// A capacity of zero is rejected.
    pub fn new(inner: SharedWriter, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(ErrorEnvelope::expected(
                ErrorCode::new("writer", "invalid_buffer_size"),
                "buffer size must be at least 1",
            ));
        }
        Ok(Self {
            inner,
            capacity,
            pending: Mutex::new(VecDeque::with_capacity(capacity)),
        })
    }

    /// Configured batch size.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries currently held back.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn drain(&self, pending: &mut VecDeque<LogEntry>) -> Result<()> {
        let batch: Vec<LogEntry> = pending.drain(..).collect();
        if batch.is_empty() {
            return Ok(());
        }
        let failures: Vec<(usize, ErrorEnvelope)> = batch
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| self.inner.write(entry).err().map(|error| (index, error)))
            .collect();
        if failures.is_empty() {
            tracing::debug!(entries = batch.len(), "buffered entries delivered");
            return Ok(());
        }
        Err(delivery_failure(batch.len(), failures))
    }
}

fn delivery_failure(attempted: usize, failures: Vec<(usize, ErrorEnvelope)>) -> ErrorEnvelope {
    let class = if failures.iter().all(|(_, error)| error.class.is_retriable()) {
        ErrorClass::Retriable
    } else {
        ErrorClass::NonRetriable
    };
    let mut envelope = ErrorEnvelope::unexpected(
        ErrorCode::new("writer", "buffered_delivery_failed"),
        format!(
            "{} of {attempted} buffered entries were rejected",
            failures.len()
        ),
        class,
    )
    .with_metadata("failed", failures.len().to_string())
    .with_metadata("attempted", attempted.to_string());
    for (index, error) in failures {
        envelope = envelope.with_metadata(format!("error.{index}"), error.to_string());
    }
    envelope
}

impl LogWriter for BufferedWriter {
    fn write(&self, entry: &LogEntry) -> Result<()> {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        pending.push_back(entry.clone());
        if pending.len() >= self.capacity {
            self.drain(&mut pending)?;
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        let delivered = self.drain(&mut pending);
        let flushed = self.inner.flush();
        delivered.and(flushed)
    }
}

impl Drop for BufferedWriter {
    fn drop(&mut self) {
        let pending = self.pending.get_mut().unwrap_or_else(PoisonError::into_inner);
        let mut pending = std::mem::take(pending);
        if let Err(error) = self.drain(&mut pending) {
            tracing::warn!(error = %error, "buffered entries lost on shutdown");
        }
    }
}

impl fmt::Debug for BufferedWriter {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("BufferedWriter")
            .field("capacity", &self.capacity)
            .field("pending", &self.pending())
            .finish_non_exhaustive()
    }
}
