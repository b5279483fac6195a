//! HTTP transport seam and the reqwest-backed default implementation.

use std::sync::RwLock;

use async_trait::async_trait;
use bytes::Bytes;

use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::request::RequestMethod;
use crate::response::Response;

/// A fully resolved request handed to a [`Transport`].
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: RequestMethod,
    /// Absolute URL including the query string.
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Bytes>,
}

impl HttpRequest {
    /// Get a header value (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Category of a transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Timeout,
    Connect,
    Request,
    Body,
    Closed,
    Other,
}

impl TransportErrorKind {
    /// Diagnostic type name used in synthesized responses.
    pub fn name(&self) -> &'static str {
        match self {
            TransportErrorKind::Timeout => "TimeoutError",
            TransportErrorKind::Connect => "ConnectError",
            TransportErrorKind::Request => "RequestError",
            TransportErrorKind::Body => "BodyError",
            TransportErrorKind::Closed => "TransportClosed",
            TransportErrorKind::Other => "TransportError",
        }
    }
}

/// Failure below HTTP: no response could be obtained.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{}: {message}", kind.name())]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            TransportErrorKind::Timeout
        } else if err.is_connect() {
            TransportErrorKind::Connect
        } else if err.is_body() || err.is_decode() {
            TransportErrorKind::Body
        } else if err.is_request() {
            TransportErrorKind::Request
        } else {
            TransportErrorKind::Other
        };

        TransportError::new(kind, error_chain(&err))
    }
}

/// Join an error's `Display` with every cause below it, skipping causes
/// whose text the outer message already carries.
fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !text.is_empty() && !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// Executes HTTP exchanges for the dispatcher.
///
/// Implementations must be safe to call concurrently. `close` releases the
/// underlying connections; the dispatcher calls it at most once and only for
/// transports it owns.
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Execute one exchange and return the buffered response.
    async fn execute(&self, request: HttpRequest) -> std::result::Result<Response, TransportError>;

    /// Release underlying resources.
    fn close(&self) {}
}

/// Reqwest-based transport with connection pooling.
#[derive(Debug)]
pub struct ReqwestTransport {
    inner: RwLock<Option<reqwest::Client>>,
}

impl ReqwestTransport {
    /// Build a transport from the client configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .gzip(config.accept_compressed)
            .deflate(config.accept_compressed)
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self::from_client(client))
    }

    /// Wrap an existing reqwest client.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self {
            inner: RwLock::new(Some(client)),
        }
    }

    /// Returns true once `close` has been called.
    pub fn is_closed(&self) -> bool {
        self.inner.read().map(|c| c.is_none()).unwrap_or(true)
    }

    fn client(&self) -> std::result::Result<reqwest::Client, TransportError> {
        let guard = self
            .inner
            .read()
            .map_err(|_| TransportError::new(TransportErrorKind::Other, "transport lock poisoned"))?;
        guard
            .clone()
            .ok_or_else(|| TransportError::new(TransportErrorKind::Closed, "transport has been closed"))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> std::result::Result<Response, TransportError> {
        let client = self.client()?;

        let mut req = client.request(request.method.to_reqwest(), &request.url);
        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            req = req.body(body);
        }

        let response = req.send().await?;
        let status = response.status().as_u16();
        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.bytes().await?;

        Ok(Response::new(status, headers, body))
    }

    fn close(&self) {
        if let Ok(mut guard) = self.inner.write() {
            // Dropping the client releases its connection pool.
            guard.take();
        }
    }
}
