//! Writer stack assembly from `LoggerConfig`.

use crate::InfraResult;
use effect_log_adapters::{
    BufferedWriter, ConsoleWriter, FileWriter, JsonConsoleWriter, MultiWriter, OutputStream,
};
use effect_log_config::{FileSinkConfig, LogFormat, LoggerConfig, StreamTarget};
use effect_log_domain::LogLevel;
use effect_log_ports::SharedWriter;
use std::path::Path;
use std::sync::Arc;

/// Build the writer described by `config` on its configured stream.
pub fn build_writer(config: &LoggerConfig) -> InfraResult<SharedWriter> {
    build_writer_on(config, stream_for(config.stream))
}

/// Build the writer described by `config`, rendering console output to `stream`.
///
/// The console sink is always present. File and error-file sinks join it in
/// a `MultiWriter`, console first.
pub fn build_writer_on(config: &LoggerConfig, stream: OutputStream) -> InfraResult<SharedWriter> {
    config.validate()?;

    let mut sinks = vec![console_writer(config, stream)];
    if let Some(file) = &config.file {
        sinks.push(file_writer(file, config.level, config.buffer_size)?);
    }
    if let Some(path) = &config.error_file {
        sinks.push(error_file_writer(path)?);
    }

    tracing::debug!(
        sinks = sinks.len(),
        format = ?config.format,
        level = %config.level,
        "logging writer assembled"
    );
    if sinks.len() == 1 {
        if let Some(only) = sinks.pop() {
            return Ok(only);
        }
    }
    Ok(Arc::new(MultiWriter::new(sinks)))
}

fn stream_for(target: StreamTarget) -> OutputStream {
    match target {
        StreamTarget::Stdout => OutputStream::stdout(),
        StreamTarget::Stderr => OutputStream::stderr(),
    }
}

fn console_writer(config: &LoggerConfig, stream: OutputStream) -> SharedWriter {
    match config.format {
        LogFormat::Console => Arc::new(
            ConsoleWriter::new()
                .with_stream(stream)
                .with_colors(config.colors)
                .with_min_level(config.level),
        ),
        LogFormat::Json => Arc::new(
            JsonConsoleWriter::new()
                .with_stream(stream)
                .with_min_level(config.level),
        ),
    }
}

fn file_writer(
    file: &FileSinkConfig,
    logger_level: LogLevel,
    buffer_size: Option<u32>,
) -> InfraResult<SharedWriter> {
    let writer: SharedWriter = Arc::new(
        FileWriter::new(&file.path)?
            .with_append(file.append)
            .with_min_level(file.level.unwrap_or(logger_level)),
    );
    match buffer_size {
        Some(size) => {
            let capacity = usize::try_from(size).unwrap_or(usize::MAX);
            Ok(Arc::new(BufferedWriter::new(writer, capacity)?))
        },
        None => Ok(writer),
    }
}

fn error_file_writer(path: &Path) -> InfraResult<SharedWriter> {
    Ok(Arc::new(FileWriter::new(path)?.with_min_level(LogLevel::Error)))
}
