//! In-memory byte sink for console writer tests.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Cloneable `Write` target whose clones share one buffer.
///
/// Hand a clone to the writer under test and read the other.
#[derive(Debug, Clone, Default)]
pub struct CapturedStream {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CapturedStream {
    /// Empty capture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock().expect("captured stream lock")).into_owned()
    }

    /// Written content split into lines.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for CapturedStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer
            .lock()
            .expect("captured stream lock")
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
