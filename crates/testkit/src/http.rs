//! Static request and response fixtures.

use effect_log_ports::{Headers, HttpRequest, HttpResponse, RequestBody};

/// Body held by a [`StaticRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaticBody {
    /// Text body.
    Text(String),
    /// Raw bytes.
    Bytes(Vec<u8>),
}

/// A request built from fixed values. Unset fields stay absent.
#[derive(Debug, Clone, Default)]
pub struct StaticRequest {
    method: Option<String>,
    path: Option<String>,
    headers: Headers,
    body: Option<StaticBody>,
}

impl StaticRequest {
    /// Request with `method` and `path`.
    pub fn new(method: &str, path: &str) -> Self {
        Self::empty().with_method(method).with_path(path)
    }

    /// Request with every field absent.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Set the method.
    #[must_use]
    pub fn with_method(mut self, method: &str) -> Self {
        self.method = Some(method.to_string());
        self
    }

    /// Set the path.
    #[must_use]
    pub fn with_path(mut self, path: &str) -> Self {
        self.path = Some(path.to_string());
        self
    }

    /// Add a header.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }

    /// Set a text body.
    #[must_use]
    pub fn with_text_body(mut self, body: &str) -> Self {
        self.body = Some(StaticBody::Text(body.to_string()));
        self
    }

    /// Set a byte body.
    #[must_use]
    pub fn with_bytes_body(mut self, body: &[u8]) -> Self {
        self.body = Some(StaticBody::Bytes(body.to_vec()));
        self
    }
}

impl HttpRequest for StaticRequest {
    fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    fn headers(&self) -> Headers {
        self.headers.clone()
    }

    fn body(&self) -> Option<RequestBody<'_>> {
        self.body.as_ref().map(|body| match body {
            StaticBody::Text(text) => RequestBody::Text(text),
            StaticBody::Bytes(bytes) => RequestBody::Bytes(bytes),
        })
    }
}

/// A response with an optional fixed status.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticResponse {
    status: Option<u16>,
}

impl StaticResponse {
    /// Response with `status`.
    pub fn new(status: u16) -> Self {
        Self {
            status: Some(status),
        }
    }

    /// Response that exposes no status code.
    pub fn without_status() -> Self {
        Self::default()
    }
}

impl HttpResponse for StaticResponse {
    fn status_code(&self) -> Option<u16> {
        self.status
    }
}
