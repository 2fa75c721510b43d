//! Framework-neutral view of HTTP requests and responses.
//!
//! Host-framework glue implements these traits for its own types. Every
//! accessor is optional; the middleware substitutes defaults for anything
//! missing.

use std::collections::BTreeMap;

/// Request headers by name.
pub type Headers = BTreeMap<String, String>;

/// Raw request body as seen by the host framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestBody<'a> {
    /// Already-decoded text.
    Text(&'a str),
    /// Undecoded bytes.
    Bytes(&'a [u8]),
}

impl RequestBody<'_> {
    /// Returns true when the body carries no content.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Bytes(bytes) => bytes.is_empty(),
        }
    }
}

/// Inbound request capability.
pub trait HttpRequest {
    /// HTTP method, e.g. `GET`.
    fn method(&self) -> Option<&str> {
        None
    }

    /// Request path without query string.
    fn path(&self) -> Option<&str> {
        None
    }

    /// Request headers.
    fn headers(&self) -> Headers {
        Headers::new()
    }

    /// Request body.
    fn body(&self) -> Option<RequestBody<'_>> {
        None
    }
}

/// Outbound response capability.
pub trait HttpResponse {
    /// Status code, when the framework exposes one.
    fn status_code(&self) -> Option<u16> {
        None
    }
}

impl<T: HttpRequest + ?Sized> HttpRequest for &T {
    fn method(&self) -> Option<&str> {
        (**self).method()
    }

    fn path(&self) -> Option<&str> {
        (**self).path()
    }

    fn headers(&self) -> Headers {
        (**self).headers()
    }

    fn body(&self) -> Option<RequestBody<'_>> {
        (**self).body()
    }
}

impl<T: HttpResponse + ?Sized> HttpResponse for &T {
    fn status_code(&self) -> Option<u16> {
        (**self).status_code()
    }
}

impl HttpResponse for u16 {
    fn status_code(&self) -> Option<u16> {
        Some(*self)
    }
}
