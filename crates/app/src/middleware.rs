//! HTTP request/response logging on top of [`Logger`].
//!
//! The middleware is framework neutral: host glue implements
//! [`HttpRequest`] and [`HttpResponse`] for its own types, calls
//! [`HttpLoggerMiddleware::log_request`] from its "before request" hook and
//! [`HttpLoggerMiddleware::log_response`] from its "after request" hook.

use crate::Logger;
use effect_log_config::HttpLoggingConfig;
use effect_log_domain::{Fields, LogLevel};
use effect_log_ports::{Headers, HttpRequest, HttpResponse, RequestBody};
use effect_log_shared::{ErrorEnvelope, Result, redact_if_secret};
use serde_json::{Map, Value};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Method recorded when the request exposes none.
pub const UNKNOWN_METHOD: &str = "UNKNOWN";
/// Path recorded when the request exposes none.
pub const DEFAULT_PATH: &str = "/";
/// Body recorded when raw bytes are not valid UTF-8.
pub const BINARY_BODY: &str = "<binary data>";
/// Appended to truncated bodies.
pub const TRUNCATION_MARKER: &str = "...";
/// Message of the request entry.
pub const REQUEST_MESSAGE: &str = "HTTP request";
/// Message of the response entry.
pub const RESPONSE_MESSAGE: &str = "HTTP response";

/// What a request hook hands back to host glue.
///
/// Keep it until the response is known and pass it to
/// [`HttpLoggerMiddleware::log_response`].
#[derive(Debug, Clone)]
pub struct RequestScope {
    logger: Logger,
    request_id: String,
    start_time: Instant,
}

impl RequestScope {
    /// Logger carrying `request_id`, `http_method`, `http_path` and any
    /// configured header/body fields.
    #[must_use]
    pub const fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Fresh UUID v4 for this request.
    #[must_use]
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// When the request was first observed.
    #[must_use]
    pub const fn start_time(&self) -> Instant {
        self.start_time
    }

    /// Take the request-scoped logger.
    #[must_use]
    pub fn into_logger(self) -> Logger {
        self.logger
    }
}

/// Adapts request/response pairs into logger emissions.
#[derive(Debug, Clone)]
pub struct HttpLoggerMiddleware {
    logger: Logger,
    config: HttpLoggingConfig,
}

impl HttpLoggerMiddleware {
    /// Middleware over `logger` with validated `config`.
    ///
    /// # Errors
    ///
    /// Returns a `config:*` error when the config fails validation.
    pub fn new(logger: Logger, config: HttpLoggingConfig) -> Result<Self> {
        let config = config.validate_and_normalize().map_err(ErrorEnvelope::from)?;
        Ok(Self { logger, config })
    }

    /// Middleware with the default config.
    #[must_use]
    pub fn with_defaults(logger: Logger) -> Self {
        Self {
            logger,
            config: HttpLoggingConfig::default(),
        }
    }

    /// Effective config.
    #[must_use]
    pub const fn config(&self) -> &HttpLoggingConfig {
        &self.config
    }

    /// Base logger that request scopes derive from.
    #[must_use]
    pub const fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Request then, when given, response in one call.
    ///
    /// # Errors
    ///
    /// Writer failures from either emission.
    pub fn handle<Q, S>(&self, request: &Q, response: Option<&S>) -> Result<RequestScope>
    where
        Q: HttpRequest + ?Sized,
        S: HttpResponse + ?Sized,
    {
        let scope = self.log_request(request)?;
        if let Some(response) = response {
            self.log_response(&scope, response)?;
        }
        Ok(scope)
    }

    /// Open a request scope and emit the "HTTP request" entry.
    ///
    /// Excluded paths and `logRequests = false` skip the entry but still
    /// return a usable scope.
    ///
    /// # Errors
    ///
    /// Writer failures from the request emission.
    pub fn log_request<Q>(&self, request: &Q) -> Result<RequestScope>
    where
        Q: HttpRequest + ?Sized,
    {
        let request_id = Uuid::new_v4().to_string();
        let start_time = Instant::now();
        let path = request.path().unwrap_or(DEFAULT_PATH);

        let mut fields = Fields::new();
        fields.insert("request_id".into(), Value::String(request_id.clone()));
        fields.insert(
            "http_method".into(),
            Value::String(request.method().unwrap_or(UNKNOWN_METHOD).to_string()),
        );
        fields.insert("http_path".into(), Value::String(path.to_string()));
        if self.config.include_headers {
            fields.insert(
                "headers".into(),
                headers_value(request.headers(), self.config.redact_headers),
            );
        }
        let body = self
            .config
            .include_body
            .then(|| request.body())
            .flatten()
            .filter(|body| !body.is_empty());
        if let Some(body) = body {
            fields.insert(
                "body".into(),
                Value::String(decode_body(body, self.config.max_body_size)),
            );
        }

        let scope = RequestScope {
            logger: self.logger.with_context(fields),
            request_id,
            start_time,
        };

        if self.is_excluded(path) {
            tracing::trace!(path, "request log skipped for excluded path");
        } else if self.config.log_requests {
            scope.logger.info(REQUEST_MESSAGE, None)?;
        }
        Ok(scope)
    }

    /// Emit the "HTTP response" entry timed from the scope's start.
    ///
    /// # Errors
    ///
    /// Writer failures from the response emission.
    pub fn log_response<S>(&self, scope: &RequestScope, response: &S) -> Result<()>
    where
        S: HttpResponse + ?Sized,
    {
        self.log_response_after(scope, response, scope.start_time.elapsed())
    }

    /// Emit the "HTTP response" entry with a caller-measured duration.
    ///
    /// A response without a status code is logged as 200.
    ///
    /// # Errors
    ///
    /// Writer failures from the response emission.
    pub fn log_response_after<S>(
        &self,
        scope: &RequestScope,
        response: &S,
        elapsed: Duration,
    ) -> Result<()>
    where
        S: HttpResponse + ?Sized,
    {
        if !self.config.log_responses {
            return Ok(());
        }
        let status = response.status_code().unwrap_or(200);
        let mut fields = Fields::new();
        fields.insert("http_status".into(), Value::from(status));
        fields.insert("duration_ms".into(), Value::from(duration_ms(elapsed)));
        scope
            .logger
            .log(level_for_status(status), RESPONSE_MESSAGE, Some(fields))
    }

    /// Returns true when `path` equals an excluded entry or sits below one.
    #[must_use]
    pub fn is_excluded(&self, path: &str) -> bool {
        self.config
            .exclude_paths
            .iter()
            .any(|excluded| path_matches(path, excluded))
    }
}

/// Level for a response status: 5xx ERROR, 4xx WARN, anything else INFO.
#[must_use]
pub const fn level_for_status(status: u16) -> LogLevel {
    match status {
        500.. => LogLevel::Error,
        400..=499 => LogLevel::Warn,
        _ => LogLevel::Info,
    }
}

fn path_matches(path: &str, excluded: &str) -> bool {
    path.strip_prefix(excluded)
        .is_some_and(|rest| rest.is_empty() || excluded.ends_with('/') || rest.starts_with('/'))
}

fn headers_value(headers: Headers, redact: bool) -> Value {
    let map: Map<String, Value> = headers
        .into_iter()
        .map(|(name, value)| {
            let value = if redact {
                redact_if_secret(&name, &value)
            } else {
                value
            };
            (name, Value::String(value))
        })
        .collect();
    Value::Object(map)
}

fn decode_body(body: RequestBody<'_>, max_chars: usize) -> String {
    let decoded = match body {
        RequestBody::Text(text) => Some(text),
        RequestBody::Bytes(bytes) => std::str::from_utf8(bytes).ok(),
    };
    decoded.map_or_else(|| BINARY_BODY.to_string(), |text| truncate_chars(text, max_chars))
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    let (kept, cut) = text
        .char_indices()
        .nth(max_chars)
        .map_or((text, false), |(index, _)| (text.get(..index).unwrap_or(text), true));
    if cut {
        format!("{kept}{TRUNCATION_MARKER}")
    } else {
        kept.to_string()
    }
}

fn duration_ms(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 1_000_000.0).round() / 1_000.0
}
