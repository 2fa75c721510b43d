//! Predicate-gated writer.

use effect_log_domain::LogEntry;
use effect_log_ports::{LogWriter, SharedWriter};
use effect_log_shared::Result;
use std::fmt;
use std::sync::Arc;

/// Predicate deciding whether an entry reaches the wrapped writer.
pub type EntryPredicate = Arc<dyn Fn(&LogEntry) -> bool + Send + Sync>;

/// Forwards only entries the predicate accepts.
///
/// Suited to routing on content, e.g. entries flagged `sensitive` or those
/// carrying a large `duration_ms`.
#[derive(Clone)]
pub struct FilterWriter {
    inner: SharedWriter,
    predicate: EntryPredicate,
}

impl FilterWriter {
    /// Wrap `inner` behind `predicate`.
    pub fn new(
        inner: SharedWriter,
        predicate: impl Fn(&LogEntry) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            inner,
            predicate: Arc::new(predicate),
        }
    }
}

impl LogWriter for FilterWriter {
    fn write(&self, entry: &LogEntry) -> Result<()> {
        if (self.predicate)(entry) {
            self.inner.write(entry)
        } else {
            Ok(())
        }
    }

    fn flush(&self) -> Result<()> {
        self.inner.flush()
    }
}

impl fmt::Debug for FilterWriter {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("FilterWriter").finish_non_exhaustive()
    }
}
