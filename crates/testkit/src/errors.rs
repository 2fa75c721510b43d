//! Error fixtures for writer doubles.

use effect_log_shared::{ErrorClass, ErrorCode, ErrorEnvelope};

/// A non-retriable sink failure, as a full disk would produce.
pub fn sink_error(message: &str) -> ErrorEnvelope {
    ErrorEnvelope::unexpected(ErrorCode::io(), message, ErrorClass::NonRetriable)
}

/// A retriable sink failure.
pub fn transient_sink_error(message: &str) -> ErrorEnvelope {
    ErrorEnvelope::unexpected(ErrorCode::timeout(), message, ErrorClass::Retriable)
}
