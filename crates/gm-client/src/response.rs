//! Endpoint responses and status checking.

use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;
use chrono::{DateTime, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{Error, ErrorKind, Result};
use crate::security::redact::sanitize_message;

/// A completed exchange: status code, headers and the fully buffered body.
///
/// Responses are also synthesized by the dispatcher for transport failures
/// (400) and unsupported methods (405).
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    headers: HashMap<String, String>,
    body: Bytes,
}

impl Response {
    /// Create a response. Header names are normalized to lowercase.
    pub fn new(
        status: u16,
        headers: impl IntoIterator<Item = (String, String)>,
        body: impl Into<Bytes>,
    ) -> Self {
        let headers = headers
            .into_iter()
            .map(|(k, v)| (k.to_ascii_lowercase(), v))
            .collect();

        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Response built locally rather than received from the service.
    pub(crate) fn synthesized(status: u16, content_type: &str, body: impl Into<Bytes>) -> Self {
        Self::new(
            status,
            [("content-type".to_string(), content_type.to_string())],
            body,
        )
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns true if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get a header value (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Get the Content-Type header.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Raw body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body as UTF-8 text.
    pub fn text(&self) -> Result<&str> {
        std::str::from_utf8(&self.body).map_err(|e| {
            Error::with_source(
                ErrorKind::Other("Failed to decode response as UTF-8".to_string()),
                e,
            )
        })
    }

    /// Consume the response, returning the body.
    pub fn into_bytes(self) -> Bytes {
        self.body
    }

    /// Deserialize the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(Into::into)
    }

    /// Deserialize a `{ "result": ... }` envelope and return its payload.
    pub fn json_result<T: DeserializeOwned>(&self) -> Result<T> {
        self.json::<Envelope<T>>().map(|envelope| envelope.result)
    }

    /// Get the Retry-After header as a Duration.
    pub fn retry_after(&self) -> Option<Duration> {
        let value = self.header("retry-after")?;
        value.trim().parse::<u64>().ok().map(Duration::from_secs)
    }

    /// Rate limit information from the `X-RateLimit-*` headers.
    pub fn rate_limit(&self) -> Option<RateLimitInfo> {
        let limit = self.header("x-ratelimit-limit")?.trim().parse().ok()?;
        let remaining = self.header("x-ratelimit-remaining")?.trim().parse().ok()?;
        let reset = self
            .header("x-ratelimit-reset")
            .and_then(|v| v.trim().parse::<i64>().ok())
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single());

        Some(RateLimitInfo {
            limit,
            remaining,
            reset,
        })
    }
}

/// `{ "result": ... }` response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub result: T,
}

/// Rate limit information from response headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// Requests allowed in the current window.
    pub limit: u64,
    /// Requests left in the current window.
    pub remaining: u64,
    /// When the window resets.
    pub reset: Option<DateTime<Utc>>,
}

impl RateLimitInfo {
    /// Number of requests already used in this window.
    pub fn used(&self) -> u64 {
        self.limit.saturating_sub(self.remaining)
    }

    /// Get the usage percentage.
    pub fn percentage(&self) -> f64 {
        if self.limit == 0 {
            100.0
        } else {
            (self.used() as f64 / self.limit as f64) * 100.0
        }
    }

    /// Returns true once no requests remain in the window.
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Time left until the window resets, relative to `now`.
    pub fn reset_after(&self, now: DateTime<Utc>) -> Option<Duration> {
        let reset = self.reset?;
        (reset - now).to_std().ok()
    }
}

/// Extension trait for status checking.
pub trait ResponseExt: Sized {
    /// Return the response unchanged on 2xx, otherwise a typed error carrying
    /// the parsed error payload.
    fn ensure_success(self) -> Result<Response>;
}

impl ResponseExt for Response {
    fn ensure_success(self) -> Result<Response> {
        if self.is_success() {
            return Ok(self);
        }

        let body = String::from_utf8_lossy(&self.body);
        Err(parse_error_response(&self, &body))
    }
}

/// Field-level validation error list.
#[derive(Debug, Deserialize)]
struct ErrorList {
    errors: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    field: Option<String>,
    message: String,
}

/// Single message with the indices of the offending items.
#[derive(Debug, Deserialize)]
struct IndexedError {
    message: String,
    #[serde(default)]
    error_indices: Vec<i64>,
}

#[derive(Debug, Deserialize)]
struct PlainError {
    error: String,
}

struct ParsedPayload {
    message: String,
    field: Option<String>,
    error_indices: Vec<i64>,
}

fn parse_payload(body: &str) -> Option<ParsedPayload> {
    if let Ok(list) = serde_json::from_str::<ErrorList>(body) {
        if !list.errors.is_empty() {
            let field = list.errors.iter().find_map(|e| e.field.clone());
            let message = list
                .errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            return Some(ParsedPayload {
                message,
                field,
                error_indices: Vec::new(),
            });
        }
    }

    if let Ok(err) = serde_json::from_str::<IndexedError>(body) {
        return Some(ParsedPayload {
            message: err.message,
            field: None,
            error_indices: err.error_indices,
        });
    }

    if let Ok(err) = serde_json::from_str::<PlainError>(body) {
        return Some(ParsedPayload {
            message: err.error,
            field: None,
            error_indices: Vec::new(),
        });
    }

    None
}

/// Parse error response body and convert to appropriate error kind.
fn parse_error_response(response: &Response, body: &str) -> Error {
    let status = response.status();

    if status == 429 {
        let retry_after = response.retry_after().or_else(|| {
            response
                .rate_limit()
                .and_then(|info| info.reset_after(Utc::now()))
        });
        return Error::new(ErrorKind::RateLimited { retry_after });
    }

    let payload = parse_payload(body);
    let message = match &payload {
        Some(p) => sanitize_message(&p.message),
        None if body.trim().is_empty() => format!("HTTP {}", status),
        None => sanitize_message(body),
    };

    let kind = match (status, payload) {
        (401, _) => ErrorKind::Authentication(message),
        (403, _) => ErrorKind::Authorization(message),
        (404, _) => ErrorKind::NotFound(message),
        (_, Some(p)) => ErrorKind::Api {
            status,
            message,
            field: p.field,
            error_indices: p.error_indices,
        },
        (_, None) => ErrorKind::Http { status, message },
    };

    Error::new(kind)
}
