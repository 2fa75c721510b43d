//! Writer boundary contract.

use effect_log_domain::LogEntry;
use effect_log_shared::Result;
use std::sync::Arc;

/// A sink that consumes log entries.
///
/// Implementations serialize access to their own mutable state; the same
/// writer is routinely shared by many loggers across threads. Entries are
/// borrowed and must not be altered.
pub trait LogWriter: Send + Sync {
    /// Consume one entry.
    fn write(&self, entry: &LogEntry) -> Result<()>;

    /// Force delivery of anything held back. Stateless writers need not override.
    fn flush(&self) -> Result<()> {
        Ok(())
    }
}

/// Shared handle to a writer.
pub type SharedWriter = Arc<dyn LogWriter>;

impl<W: LogWriter + ?Sized> LogWriter for Arc<W> {
    fn write(&self, entry: &LogEntry) -> Result<()> {
        (**self).write(entry)
    }

    fn flush(&self) -> Result<()> {
        (**self).flush()
    }
}

impl<W: LogWriter + ?Sized> LogWriter for Box<W> {
    fn write(&self, entry: &LogEntry) -> Result<()> {
        (**self).write(entry)
    }

    fn flush(&self) -> Result<()> {
        (**self).flush()
    }
}
