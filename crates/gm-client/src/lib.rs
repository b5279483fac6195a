//! # gm-client
//!
//! Core HTTP dispatcher for the transactional email v3 REST API.
//!
//! This crate provides the shared low-level client every resource facade
//! goes through:
//! - Base URL and API version handling with path normalization
//! - Bearer authentication, JSON accept and user-agent headers
//! - Verb dispatch (GET, POST, PUT, PATCH, DELETE) with optional JSON bodies
//! - Transport failures converted into synthesized 400 responses
//! - Cooperative cancellation
//! - Typed error parsing through [`Response::ensure_success`]
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Resource Facades                         │
//! │  (gm-resources: bounces, campaigns, statistics, ...)        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      GridClient                             │
//! │  - Holds API key, base URL, default headers                 │
//! │  - Verb methods + typed JSON helpers                        │
//! │  - Maps transport failures to 400 responses                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Transport (trait)                         │
//! │  - ReqwestTransport by default                              │
//! │  - Shared (caller owned) or owned (closed by the client)    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use gridmail_client::{GridClient, ResponseExt};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), gridmail_client::Error> {
//!     let client = GridClient::new("SG.my-api-key")?;
//!
//!     let response = client.get("user/profile").await?;
//!     let profile: serde_json::Value = response.ensure_success()?.json()?;
//!
//!     let body = serde_json::json!({"name": "Newsletter"});
//!     let response = client.post("asm/groups", Some(&body)).await?;
//!     println!("{}", response.status());
//!
//!     client.close();
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod request;
mod response;
pub mod security;
mod transport;

pub use client::GridClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{Error, ErrorKind, Result};
pub use request::{ApiRequest, RequestMethod};
pub use response::{Envelope, RateLimitInfo, Response, ResponseExt};
pub use transport::{HttpRequest, ReqwestTransport, Transport, TransportError, TransportErrorKind};

/// Re-exported so callers can build cancellation signals without a direct dependency.
pub use tokio_util::sync::CancellationToken;

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.sendgrid.com";

/// Default API version path segment.
pub const DEFAULT_API_VERSION: &str = "v3";

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("gridmail/", env!("CARGO_PKG_VERSION"));
