//! Security utilities shared by every facade.
//!
//! ## URL Path Encoding
//!
//! User-provided values placed in URL paths (email addresses, key ids, group
//! ids) MUST be encoded so they cannot add path segments or query strings:
//!
//! ```rust
//! use gridmail_client::security::url;
//!
//! let email = url::encode_segment("someone+tag@example.com");
//! let path = format!("suppression/bounces/{}", email);
//! assert_eq!(path, "suppression/bounces/someone%2Btag%40example.com");
//! ```
//!
//! ## Message Redaction
//!
//! Error messages built from response bodies pass through
//! [`redact::sanitize_message`] before they reach an `Error`.

/// URL encoding utilities for parameter safety.
pub mod url {
    /// Percent-encode a single path segment.
    ///
    /// ```rust
    /// use gridmail_client::security::url;
    ///
    /// assert_eq!(url::encode_segment("../secret"), "..%2Fsecret");
    /// ```
    #[must_use]
    pub fn encode_segment(value: &str) -> String {
        urlencoding::encode(value).into_owned()
    }

    /// Join a relative path onto the API root, inserting exactly one `/`
    /// when the path does not already start with one.
    #[must_use]
    pub fn join_path(root: &str, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", root, path)
        } else {
            format!("{}/{}", root, path)
        }
    }
}

/// Redaction of secrets in text that may end up in logs or errors.
pub mod redact {
    use std::sync::LazyLock;

    use regex_lite::Regex;

    const MAX_LENGTH: usize = 500;

    static API_KEY: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"SG\.[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}").expect("static pattern")
    });

    static BEARER: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?i)bearer\s+[A-Za-z0-9._~+/=-]+").expect("static pattern")
    });

    /// Sanitize a message to prevent exposing credentials.
    ///
    /// Redacts API keys and bearer tokens, then truncates anything longer
    /// than 500 characters.
    #[must_use]
    pub fn sanitize_message(message: &str) -> String {
        let sanitized = API_KEY.replace_all(message, "[REDACTED_API_KEY]");
        let sanitized = BEARER.replace_all(&sanitized, "Bearer [REDACTED]");

        match sanitized.char_indices().nth(MAX_LENGTH) {
            Some((cut, _)) => format!("{}...[truncated]", &sanitized[..cut]),
            None => sanitized.into_owned(),
        }
    }

    /// Mask an API key for display, keeping only a short prefix.
    #[must_use]
    pub fn mask_api_key(key: &str) -> String {
        let prefix: String = key.chars().take(4).collect();
        format!("{}…[REDACTED]", prefix)
    }
}
