//! Line-delimited JSON file writer.

use crate::render::render_json;
use effect_log_domain::{LogEntry, LogLevel};
use effect_log_ports::LogWriter;
use effect_log_shared::{ErrorCode, ErrorEnvelope, Result};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// How an existing file is treated when the writer first opens it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileMode {
    /// Keep existing content and add lines after it.
    #[default]
    Append,
    /// Discard existing content on first open.
    Truncate,
}

/// Appends one JSON object per line to a file.
///
/// The file is opened on the first admitted write, creating missing parent
/// directories. The handle then stays open for the writer's lifetime.
#[derive(Debug)]
pub struct FileWriter {
    path: PathBuf,
    mode: FileMode,
    min_level: LogLevel,
    file: Mutex<Option<File>>,
}

impl FileWriter {
    /// Appending writer that admits every level.
    ///
    /// Rejects an empty path and a path naming an existing directory.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        validate_path(&path)?;
        Ok(Self {
            path,
            mode: FileMode::Append,
            min_level: LogLevel::Trace,
            file: Mutex::new(None),
        })
    }

    /// Set append or truncate behavior.
    #[must_use]
    pub const fn with_mode(mut self, mode: FileMode) -> Self {
        self.mode = mode;
        self
    }

    /// Convenience for `with_mode` from a boolean append flag.
    #[must_use]
    pub const fn with_append(self, append: bool) -> Self {
        self.with_mode(if append {
            FileMode::Append
        } else {
            FileMode::Truncate
        })
    }

    /// Set this writer's own threshold.
    #[must_use]
    pub const fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Target path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<File> {
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|error| {
                ErrorEnvelope::io("create log directory", &error)
                    .with_metadata("path", parent.display().to_string())
            })?;
        }
        let mut options = OpenOptions::new();
        options.create(true);
        match self.mode {
            FileMode::Append => options.append(true),
            FileMode::Truncate => options.write(true).truncate(true),
        };
        let file = options.open(&self.path).map_err(|error| {
            ErrorEnvelope::io("open log file", &error)
                .with_metadata("path", self.path.display().to_string())
        })?;
        tracing::debug!(path = %self.path.display(), mode = ?self.mode, "log file opened");
        Ok(file)
    }
}

fn validate_path(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(ErrorEnvelope::expected(
            ErrorCode::new("writer", "invalid_path"),
            "log file path must be non-empty",
        ));
    }
    if path.is_dir() {
        return Err(ErrorEnvelope::expected(
            ErrorCode::new("writer", "invalid_path"),
            "log file path names a directory",
        )
        .with_metadata("path", path.display().to_string()));
    }
    Ok(())
}

impl LogWriter for FileWriter {
    fn write(&self, entry: &LogEntry) -> Result<()> {
        if !self.min_level.admits(entry.level) {
            return Ok(());
        }
        let mut line = render_json(entry)?;
        line.push('\n');

        let mut guard = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        let file = match guard.take() {
            Some(file) => guard.insert(file),
            None => guard.insert(self.open()?),
        };
        file.write_all(line.as_bytes()).map_err(|error| {
            ErrorEnvelope::io("append log line", &error)
                .with_metadata("path", self.path.display().to_string())
        })
    }

    fn flush(&self) -> Result<()> {
        let mut guard = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        match guard.as_mut() {
            Some(file) => file.flush().map_err(|error| {
                ErrorEnvelope::io("flush log file", &error)
                    .with_metadata("path", self.path.display().to_string())
            }),
            None => Ok(()),
        }
    }
}
