//! HTTP dispatcher: authentication, path normalization, verb dispatch and
//! transport failure mapping.
//!
//! ## Security
//!
//! - The API key is redacted in Debug output
//! - Request bodies are never recorded in tracing spans

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::request::{ApiRequest, RequestMethod};
use crate::response::{Response, ResponseExt};
use crate::security::{redact, url as url_util};
use crate::transport::{HttpRequest, ReqwestTransport, Transport};

/// Shared state behind every clone of a [`GridClient`].
struct ClientInner {
    transport: Arc<dyn Transport>,
    owns_transport: bool,
    closed: AtomicBool,
    config: ClientConfig,
    api_root: String,
    api_key: String,
    default_headers: Vec<(String, String)>,
}

impl ClientInner {
    fn release(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        if self.owns_transport {
            self.transport.close();
            debug!("Owned transport closed");
        }
    }
}

impl Drop for ClientInner {
    fn drop(&mut self) {
        self.release();
    }
}

/// Low-level API client.
///
/// Holds the API key, the API root (`{base_url}/{api_version}`) and a
/// transport. Cloning is cheap and clones share the same transport. All
/// configuration is fixed at construction, so one client can serve
/// concurrent calls.
///
/// Verb methods never fail because of the network: when the transport
/// cannot produce a response, a 400 response describing the failure is
/// returned instead. Status interpretation is left to
/// [`ResponseExt::ensure_success`].
///
/// # Example
///
/// ```rust,ignore
/// use gridmail_client::{GridClient, ResponseExt};
///
/// let client = GridClient::new("SG.key")?;
/// let response = client.get("/scopes").await?;
/// let scopes: serde_json::Value = response.ensure_success()?.json()?;
/// ```
#[derive(Clone)]
pub struct GridClient {
    inner: Arc<ClientInner>,
    cancel: Option<CancellationToken>,
}

impl std::fmt::Debug for GridClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridClient")
            .field("api_root", &self.inner.api_root)
            .field("api_key", &"[REDACTED]")
            .field("owns_transport", &self.inner.owns_transport)
            .field("cancellable", &self.cancel.is_some())
            .finish_non_exhaustive()
    }
}

impl GridClient {
    /// Create a client for the default API root.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(api_key, ClientConfig::default())
    }

    /// Create a client with custom configuration and its own transport.
    pub fn with_config(api_key: impl Into<String>, config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Self::build(api_key.into(), config, Arc::new(transport), true)
    }

    /// Create a client over a transport the caller keeps using elsewhere.
    ///
    /// The client never closes a shared transport.
    pub fn with_transport(
        api_key: impl Into<String>,
        config: ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        Self::build(api_key.into(), config, transport, false)
    }

    /// Create a client that takes ownership of `transport` and closes it
    /// when the client is closed or dropped.
    pub fn with_owned_transport(
        api_key: impl Into<String>,
        config: ClientConfig,
        transport: Box<dyn Transport>,
    ) -> Result<Self> {
        Self::build(api_key.into(), config, Arc::from(transport), true)
    }

    /// Create a client from `GRIDMAIL_API_KEY` and [`ClientConfig::from_env`].
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GRIDMAIL_API_KEY").map_err(|_| {
            Error::new(ErrorKind::Config(
                "GRIDMAIL_API_KEY environment variable is not set".to_string(),
            ))
        })?;
        Self::with_config(api_key, ClientConfig::from_env()?)
    }

    fn build(
        api_key: String,
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        owns_transport: bool,
    ) -> Result<Self> {
        let api_key = api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(Error::new(ErrorKind::Config(
                "API key must not be empty".to_string(),
            )));
        }

        let config = config.validated()?;
        let api_root = config.api_root();
        let default_headers = vec![
            ("Authorization".to_string(), format!("Bearer {}", api_key)),
            ("Accept".to_string(), "application/json".to_string()),
            ("User-Agent".to_string(), config.user_agent.clone()),
        ];

        debug!(
            api_root = %api_root,
            api_key = %redact::mask_api_key(&api_key),
            owns_transport,
            "Client created"
        );

        Ok(Self {
            inner: Arc::new(ClientInner {
                transport,
                owns_transport,
                closed: AtomicBool::new(false),
                config,
                api_root,
                api_key,
                default_headers,
            }),
            cancel: None,
        })
    }

    /// Return a handle sharing this client whose calls abort when `token`
    /// is cancelled.
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            cancel: Some(token),
        }
    }

    /// Cancellation signal observed by this handle, if any.
    pub fn cancellation_token(&self) -> Option<&CancellationToken> {
        self.cancel.as_ref()
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// `{base_url}/{api_version}`.
    pub fn api_root(&self) -> &str {
        &self.inner.api_root
    }

    /// Get the API key.
    pub fn api_key(&self) -> &str {
        &self.inner.api_key
    }

    /// Build the full URL for a path relative to the API root.
    ///
    /// `"user/profile"` and `"/user/profile"` resolve to the same URL.
    pub fn url(&self, path: &str) -> String {
        url_util::join_path(&self.inner.api_root, path)
    }

    /// Release the transport if this client owns it.
    ///
    /// Safe to call any number of times, from any clone. Shared transports
    /// are left open.
    pub fn close(&self) {
        self.inner.release();
    }

    /// Returns true once [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::Acquire)
    }

    // =========================================================================
    // Verb Methods
    // =========================================================================

    /// Send a GET request.
    pub async fn get(&self, path: &str) -> Result<Response> {
        self.send(ApiRequest::get(path)).await
    }

    /// Send a POST request with an optional JSON body.
    pub async fn post(&self, path: &str, body: Option<&serde_json::Value>) -> Result<Response> {
        self.send(with_body(ApiRequest::post(path), body)).await
    }

    /// Send a PUT request with an optional JSON body.
    pub async fn put(&self, path: &str, body: Option<&serde_json::Value>) -> Result<Response> {
        self.send(with_body(ApiRequest::put(path), body)).await
    }

    /// Send a PATCH request with an optional JSON body.
    pub async fn patch(&self, path: &str, body: Option<&serde_json::Value>) -> Result<Response> {
        self.send(with_body(ApiRequest::patch(path), body)).await
    }

    /// Send a DELETE request with an optional JSON body.
    pub async fn delete(&self, path: &str, body: Option<&serde_json::Value>) -> Result<Response> {
        self.send(with_body(ApiRequest::delete(path), body)).await
    }

    /// Execute a request and return the response, whatever its status.
    ///
    /// Errors only when the request is cancelled or its URL is invalid.
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn send(&self, request: ApiRequest) -> Result<Response> {
        let exchange = self.dispatch(request);

        match &self.cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => {
                    debug!("Request cancelled");
                    Err(Error::new(ErrorKind::Cancelled))
                }
                response = exchange => response,
            },
            None => exchange.await,
        }
    }

    async fn dispatch(&self, request: ApiRequest) -> Result<Response> {
        if !request.method.is_dispatchable() {
            warn!(method = %request.method, "Unsupported HTTP method");
            return Ok(unsupported_method(request.method));
        }

        let http_request = self.build_http_request(request)?;
        let tracing_enabled = self.inner.config.enable_tracing;

        if tracing_enabled {
            debug!(method = %http_request.method, url = %http_request.url, "Sending request");
        }

        match self.inner.transport.execute(http_request).await {
            Ok(response) => {
                if tracing_enabled {
                    let status = response.status();
                    let content_length = response.body().len();
                    if response.is_success() {
                        debug!(status, content_length, "Response received");
                    } else {
                        info!(status, content_length, "Non-success response");
                    }
                }
                Ok(response)
            }
            Err(err) => {
                warn!(error = %err, "Transport failure, returning synthesized 400 response");
                Ok(Response::synthesized(
                    400,
                    "text/plain; charset=utf-8",
                    err.to_string(),
                ))
            }
        }
    }

    fn build_http_request(&self, request: ApiRequest) -> Result<HttpRequest> {
        let mut url = url::Url::parse(&self.url(&request.path))?;
        if !request.query_params.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query_params.iter());
        }

        let mut headers = self.inner.default_headers.clone();
        let body = match request.body {
            Some(value) => {
                let bytes = serde_json::to_vec(&value)
                    .map_err(|e| Error::with_source(ErrorKind::Serialization(e.to_string()), e))?;
                headers.push(("Content-Type".to_string(), "application/json".to_string()));
                Some(bytes::Bytes::from(bytes))
            }
            None => None,
        };

        Ok(HttpRequest {
            method: request.method,
            url: url.into(),
            headers,
            body,
        })
    }

    // =========================================================================
    // Typed JSON Methods
    // =========================================================================

    /// Execute a request, check its status and deserialize the JSON body.
    pub async fn send_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let response = self.send(request).await?.ensure_success()?;
        response.json()
    }

    /// Execute a request, check its status and unwrap a `{ "result": .. }`
    /// envelope.
    pub async fn send_enveloped<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let response = self.send(request).await?.ensure_success()?;
        response.json_result()
    }

    /// Execute a request and check its status, discarding the body.
    pub async fn send_no_content(&self, request: ApiRequest) -> Result<()> {
        self.send(request).await?.ensure_success()?;
        Ok(())
    }

    /// GET request with JSON response deserialization.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send_json(ApiRequest::get(path)).await
    }

    /// POST request with JSON body and response.
    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.send_json(ApiRequest::post(path).json(body)?).await
    }

    /// PUT request with JSON body and response.
    pub async fn put_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.send_json(ApiRequest::put(path).json(body)?).await
    }

    /// PATCH request with JSON body and response.
    pub async fn patch_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.send_json(ApiRequest::patch(path).json(body)?).await
    }
}

fn with_body(request: ApiRequest, body: Option<&serde_json::Value>) -> ApiRequest {
    match body {
        Some(value) => request.json_value(value.clone()),
        None => request,
    }
}

fn unsupported_method(method: RequestMethod) -> Response {
    let body = serde_json::json!({
        "errors": [{
            "field": null,
            "message": format!("HTTP method {} is not supported", method),
        }]
    });
    Response::synthesized(405, "application/json", body.to_string())
}
