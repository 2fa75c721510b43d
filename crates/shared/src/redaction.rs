//! Secret detection and redaction utilities.
//!
//! Used when request headers are attached to log entries: header names that
//! look like they carry credentials get their values replaced.

/// The redacted placeholder string.
pub const REDACTED: &str = "[REDACTED]";

/// Checks if a key or header name likely refers to a secret.
///
/// # Examples
///
/// ```
/// use effect_log_shared::is_secret_key;
///
/// assert!(is_secret_key("Authorization"));
/// assert!(is_secret_key("X-Api-Key"));
/// assert!(is_secret_key("Set-Cookie"));
/// assert!(!is_secret_key("Content-Type"));
/// ```
pub fn is_secret_key(key: &str) -> bool {
    let key = key.to_ascii_uppercase();
    key.contains("KEY")
        || key.contains("TOKEN")
        || key.contains("SECRET")
        || key.contains("PASSWORD")
        || key.contains("CREDENTIAL")
        || key.contains("AUTH")
        || key.contains("COOKIE")
        || key.contains("SESSION")
}

/// Redacts a value if the key is likely a secret.
///
/// # Examples
///
/// ```
/// use effect_log_shared::redact_if_secret;
///
/// assert_eq!(redact_if_secret("Authorization", "Bearer abc"), "[REDACTED]");
/// assert_eq!(redact_if_secret("Accept", "text/html"), "text/html");
/// ```
pub fn redact_if_secret(key: &str, value: &str) -> String {
    if is_secret_key(key) {
        REDACTED.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_credential_headers() {
        assert!(is_secret_key("authorization"));
        assert!(is_secret_key("Proxy-Authorization"));
        assert!(is_secret_key("x-auth-token"));
        assert!(is_secret_key("X-CSRF-Token"));
        assert!(is_secret_key("cookie"));
        assert!(is_secret_key("X-Session-Id"));
        assert!(is_secret_key("client_secret"));
    }

    #[test]
    fn leaves_ordinary_headers_alone() {
        assert!(!is_secret_key("Content-Type"));
        assert!(!is_secret_key("User-Agent"));
        assert!(!is_secret_key("Accept"));
        assert!(!is_secret_key("X-Forwarded-For"));
        assert!(!is_secret_key("X-Request-Id"));
    }

    #[test]
    fn redacts_only_secret_values() {
        assert_eq!(redact_if_secret("Cookie", "sid=1"), REDACTED);
        assert_eq!(redact_if_secret("Host", "example.com"), "example.com");
    }
}
