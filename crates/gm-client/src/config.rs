//! Client configuration.

use std::time::Duration;

use crate::error::{Error, ErrorKind, Result};

/// Configuration for the HTTP dispatcher.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Scheme and host of the API, without a trailing slash.
    pub base_url: String,
    /// Version path segment appended to the base URL (e.g. `v3`).
    pub api_version: String,
    /// Upper bound on a whole exchange, body included.
    pub timeout: Duration,
    /// Upper bound on establishing the TCP/TLS connection.
    pub connect_timeout: Duration,
    /// How long an unused pooled connection is kept open.
    pub pool_idle_timeout: Duration,
    pub pool_max_idle_per_host: usize,
    /// Accept gzip/deflate compressed responses.
    pub accept_compressed: bool,
    /// Sent as `User-Agent`; defaults to `gridmail/<version>`.
    pub user_agent: String,
    /// Emit debug events for every exchange.
    pub enable_tracing: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: crate::DEFAULT_BASE_URL.to_string(),
            api_version: crate::DEFAULT_API_VERSION.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            pool_idle_timeout: Duration::from_secs(90),
            pool_max_idle_per_host: 10,
            accept_compressed: true,
            user_agent: crate::USER_AGENT.to_string(),
            enable_tracing: true,
        }
    }
}

impl ClientConfig {
    /// Create a new client config builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Load configuration overrides from the environment.
    ///
    /// Reads `GRIDMAIL_BASE_URL`, `GRIDMAIL_API_VERSION` and
    /// `GRIDMAIL_TIMEOUT_SECS`; unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        let mut builder = Self::builder();

        if let Ok(base_url) = std::env::var("GRIDMAIL_BASE_URL") {
            builder = builder.with_base_url(base_url);
        }
        if let Ok(version) = std::env::var("GRIDMAIL_API_VERSION") {
            builder = builder.with_api_version(version);
        }
        if let Ok(secs) = std::env::var("GRIDMAIL_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                Error::new(ErrorKind::Config(format!(
                    "GRIDMAIL_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                    secs
                )))
            })?;
            builder = builder.with_timeout(Duration::from_secs(secs));
        }

        builder.build().validated()
    }

    /// The URL every request path is appended to: `{base_url}/{api_version}`.
    pub fn api_root(&self) -> String {
        let version = self.api_version.trim_matches('/');
        if version.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}/{}", self.base_url, version)
        }
    }

    /// Check that the base URL parses as an absolute http(s) URL.
    pub(crate) fn validated(self) -> Result<Self> {
        let parsed = url::Url::parse(&self.base_url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::new(ErrorKind::InvalidUrl(format!(
                "unsupported scheme '{}' in base URL",
                parsed.scheme()
            ))));
        }
        Ok(self)
    }
}

/// Builder for ClientConfig.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the API base URL (scheme and host).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the API version path segment.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.config.api_version = version.into();
        self
    }

    /// Per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    pub fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.config.pool_idle_timeout = timeout;
        self
    }

    /// Cap on idle pooled connections kept per host.
    pub fn with_pool_max_idle(mut self, max: usize) -> Self {
        self.config.pool_max_idle_per_host = max;
        self
    }

    /// Toggle gzip/deflate response decoding.
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.config.accept_compressed = enabled;
        self
    }

    /// Override the `User-Agent` header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Toggle per-exchange debug events.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.config.enable_tracing = enabled;
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}
