//! Fan-out writer.

use effect_log_domain::LogEntry;
use effect_log_ports::{LogWriter, SharedWriter};
use effect_log_shared::{ErrorClass, ErrorCode, ErrorEnvelope, Result};
use std::fmt;

/// Hands every entry to each child in registration order.
///
/// A failing child does not stop delivery to the ones after it; once every
/// child has been attempted, failures are reported together.
#[derive(Clone, Default)]
pub struct MultiWriter {
    writers: Vec<SharedWriter>,
}

impl MultiWriter {
    /// Fan out to `writers`, in order.
    #[must_use]
    pub fn new(writers: impl IntoIterator<Item = SharedWriter>) -> Self {
        Self {
            writers: writers.into_iter().collect(),
        }
    }

    /// Register another child after the existing ones.
    #[must_use]
    pub fn with_writer(mut self, writer: SharedWriter) -> Self {
        self.writers.push(writer);
        self
    }

    /// Number of children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.writers.len()
    }

    /// Returns true when there are no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.writers.is_empty()
    }

    fn for_each_child(
        &self,
        action: &str,
        mut apply: impl FnMut(&SharedWriter) -> Result<()>,
    ) -> Result<()> {
        let failures: Vec<(usize, ErrorEnvelope)> = self
            .writers
            .iter()
            .enumerate()
            .filter_map(|(index, writer)| apply(writer).err().map(|error| (index, error)))
            .collect();
        for (index, error) in &failures {
            tracing::warn!(child = index, error = %error, "{action} failed for child writer");
        }
        aggregate(action, self.writers.len(), failures)
    }
}

fn aggregate(action: &str, attempted: usize, failures: Vec<(usize, ErrorEnvelope)>) -> Result<()> {
    if failures.is_empty() {
        return Ok(());
    }
    let class = if failures.iter().all(|(_, error)| error.class.is_retriable()) {
        ErrorClass::Retriable
    } else {
        ErrorClass::NonRetriable
    };
    let mut envelope = ErrorEnvelope::unexpected(
        ErrorCode::new("writer", "multi_write_failed"),
        format!(
            "{action} failed for {} of {attempted} writers",
            failures.len()
        ),
        class,
    )
    .with_metadata("failed", failures.len().to_string())
    .with_metadata("attempted", attempted.to_string());
    for (index, error) in failures {
        envelope = envelope.with_metadata(format!("error.{index}"), error.to_string());
    }
    Err(envelope)
}

impl LogWriter for MultiWriter {
    fn write(&self, entry: &LogEntry) -> Result<()> {
        self.for_each_child("write", |writer| writer.write(entry))
    }

    fn flush(&self) -> Result<()> {
        self.for_each_child("flush", |writer| writer.flush())
    }
}

impl fmt::Debug for MultiWriter {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("MultiWriter")
            .field("writers", &self.writers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use effect_log_domain::LogLevel;
    use effect_log_testkit::{FailingWriter, RecordingWriter};
    use std::sync::{Arc, Mutex, PoisonError};

    struct Tagged {
        tag: &'static str,
        arrivals: Arc<Mutex<Vec<String>>>,
    }

    impl LogWriter for Tagged {
        fn write(&self, entry: &LogEntry) -> Result<()> {
            self.arrivals
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(format!("{}:{}", self.tag, entry.message));
            Ok(())
        }
    }

    #[test]
    fn every_child_receives_the_same_entry() -> Result<()> {
        let first = Arc::new(RecordingWriter::new());
        let second = Arc::new(RecordingWriter::new());
        let children: [SharedWriter; 2] = [first.clone(), second.clone()];
        let multi = MultiWriter::new(children);

        let entry = LogEntry::now(LogLevel::Info, "test message");
        multi.write(&entry)?;

        assert_eq!(first.entries(), vec![entry.clone()]);
        assert_eq!(second.entries(), vec![entry]);
        assert_eq!(multi.len(), 2);
        Ok(())
    }

    #[test]
    fn children_are_invoked_in_registration_order() -> Result<()> {
        let arrivals = Arc::new(Mutex::new(Vec::new()));
        let multi = MultiWriter::default()
            .with_writer(Arc::new(Tagged {
                tag: "child0",
                arrivals: Arc::clone(&arrivals),
            }))
            .with_writer(Arc::new(Tagged {
                tag: "child1",
                arrivals: Arc::clone(&arrivals),
            }));

        multi.write(&LogEntry::now(LogLevel::Info, "a"))?;
        multi.write(&LogEntry::now(LogLevel::Info, "b"))?;

        let seen = arrivals
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        assert_eq!(seen, vec!["child0:a", "child1:a", "child0:b", "child1:b"]);
        Ok(())
    }

    #[test]
    fn failing_child_does_not_starve_siblings() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let before = Arc::new(RecordingWriter::new());
        let after = Arc::new(RecordingWriter::new());
        let multi = MultiWriter::default()
            .with_writer(before.clone())
            .with_writer(Arc::new(FailingWriter::new("disk full")))
            .with_writer(after.clone());

        let error = multi
            .write(&LogEntry::now(LogLevel::Error, "boom"))
            .err()
            .ok_or("aggregate failure expected")?;

        assert_eq!(before.len(), 1);
        assert_eq!(after.len(), 1);
        assert_eq!(error.code, ErrorCode::new("writer", "multi_write_failed"));
        assert_eq!(error.metadata.get("failed").map(String::as_str), Some("1"));
        assert_eq!(error.metadata.get("attempted").map(String::as_str), Some("3"));
        assert!(
            error
                .metadata
                .get("error.1")
                .is_some_and(|message| message.contains("disk full"))
        );
        Ok(())
    }

    #[test]
    fn all_transient_failures_stay_retriable() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let multi = MultiWriter::default()
            .with_writer(Arc::new(FailingWriter::transient("sink busy")))
            .with_writer(Arc::new(FailingWriter::transient("sink busy")));
        let error = multi.flush().err().ok_or("aggregate failure expected")?;
        assert_eq!(error.class, ErrorClass::Retriable);

        let mixed = multi.with_writer(Arc::new(FailingWriter::new("disk full")));
        let error = mixed.flush().err().ok_or("aggregate failure expected")?;
        assert_eq!(error.class, ErrorClass::NonRetriable);
        Ok(())
    }

    #[test]
    fn flush_reaches_every_child() -> Result<()> {
        let child = Arc::new(RecordingWriter::new());
        let children: [SharedWriter; 2] = [child.clone(), child.clone()];
        let multi = MultiWriter::new(children);
        multi.flush()?;
        assert_eq!(child.flush_count(), 2);
        Ok(())
    }
}
