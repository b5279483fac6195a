//! # gm-resources
//!
//! Typed facades over the transactional email v3 REST API.
//!
//! ## Features
//!
//! - **API keys** - Create, rename, rescope and revoke keys
//! - **Suppression lists** - Bounces, blocks, spam reports and invalid emails
//! - **Unsubscribes** - Global unsubscribes, unsubscribe groups and
//!   per-group suppressions
//! - **Statistics** - Global, category, subuser and breakdown statistics
//! - **Campaigns** - Drafts, scheduling and test sends
//! - **User** - Profile, account, email, username, credits and password
//!
//! Every facade checks the HTTP status of the response and decodes the JSON
//! body; service errors surface as [`Error`] with the dispatcher error as
//! its source.
//!
//! ## Example
//!
//! ```rust,ignore
//! use chrono::NaiveDate;
//! use gridmail_resources::{AggregateBy, MailClient, StatsQuery};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), gridmail_resources::Error> {
//!     let client = MailClient::from_env()?;
//!
//!     let query = StatsQuery::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
//!         .aggregated_by(AggregateBy::Month);
//!     for period in client.statistics().global(&query).await? {
//!         println!("{}: {:?}", period.date, period.stats);
//!     }
//!
//!     let group = client
//!         .unsubscribe_groups()
//!         .create("Newsletter", "Weekly product news", false)
//!         .await?;
//!     client
//!         .suppressions()
//!         .add(group.id, &["someone@example.com".to_string()])
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

pub mod api_keys;
pub mod campaigns;
pub mod categories;
mod client;
mod error;
pub mod statistics;
pub mod suppressions;
mod types;
pub mod unsubscribe_groups;
pub mod user;

// Main client and facades
pub use client::{
    ApiKeys, Blocks, Bounces, Campaigns, Categories, GlobalSuppressions, InvalidEmails,
    MailClient, SpamReports, Statistics, SuppressionEntry, SuppressionList, Suppressions,
    UnsubscribeGroups, User,
};

// Models
pub use api_keys::ApiKey;
pub use campaigns::{Campaign, CampaignDraft, CampaignSchedule, CampaignStatus};
pub use categories::{Category, CategoryQuery};
pub use statistics::{Metrics, Statistic, StatisticEntry};
pub use suppressions::{Block, Bounce, GlobalSuppression, InvalidEmail, SpamReport};
pub use unsubscribe_groups::{GroupUpdate, SuppressionGroup};
pub use user::{Account, Credits, UserProfile, Username};

// Query types
pub use types::{AggregateBy, StatsQuery, SuppressionQuery, DATE_FORMAT};

// Error types
pub use error::{Error, ErrorKind, Result};

// Re-export the dispatcher types callers need alongside the facades
pub use gridmail_client::{CancellationToken, ClientConfig, ClientConfigBuilder, GridClient};
