//! # gridmail
//!
//! A typed Rust client for the transactional email v3 REST API.
//!
//! ## Security
//!
//! - API keys are redacted in Debug output and log events
//! - Tracing spans skip credential and password parameters
//! - Error messages from the service are sanitized of keys and bearer tokens
//!
//! ## Crates
//!
//! - **gridmail-client** - HTTP dispatcher: base URL handling, bearer
//!   authentication, verb dispatch, transport failure mapping, cancellation
//! - **gridmail-resources** - Typed facades: API keys, suppression lists,
//!   unsubscribe groups, statistics, campaigns, user
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gridmail::{MailClient, SuppressionQuery};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads GRIDMAIL_API_KEY (and optional GRIDMAIL_* overrides)
//!     let client = MailClient::from_env()?;
//!
//!     for bounce in client.bounces().list(SuppressionQuery::new()).await? {
//!         println!("{} bounced: {:?}", bounce.email, bounce.reason);
//!     }
//!
//!     // Raw access to any endpoint through the dispatcher
//!     let response = client.inner().get("scopes").await?;
//!     println!("{}", response.status());
//!
//!     client.close();
//!     Ok(())
//! }
//! ```

// Re-export all crates for convenient access
#[cfg(feature = "client")]
pub use gridmail_client as client;
#[cfg(feature = "resources")]
pub use gridmail_resources as resources;

// Re-export commonly used types at the top level
#[cfg(feature = "client")]
pub use gridmail_client::{
    ApiRequest, CancellationToken, ClientConfig, GridClient, RequestMethod, Response,
    ResponseExt,
};
#[cfg(feature = "resources")]
pub use gridmail_resources::{MailClient, StatsQuery, SuppressionQuery};
