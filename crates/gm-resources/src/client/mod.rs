//! Resource facades over the shared dispatcher.
//!
//! Each facade holds a clone of the same [`GridClient`], so creating one is
//! cheap and they can be used concurrently.

use gridmail_client::{CancellationToken, ClientConfig, GridClient};

use crate::error::Result;

mod api_keys;
mod campaigns;
mod categories;
mod global_suppressions;
mod statistics;
mod suppression_list;
mod suppressions;
mod unsubscribe_groups;
mod user;

pub use api_keys::ApiKeys;
pub use campaigns::Campaigns;
pub use categories::Categories;
pub use global_suppressions::GlobalSuppressions;
pub use statistics::Statistics;
pub use suppression_list::{
    Blocks, Bounces, InvalidEmails, SpamReports, SuppressionEntry, SuppressionList,
};
pub use suppressions::Suppressions;
pub use unsubscribe_groups::UnsubscribeGroups;
pub use user::User;

/// Entry point to the email API.
///
/// # Example
///
/// ```rust,ignore
/// use gridmail_resources::{MailClient, SuppressionQuery};
///
/// let client = MailClient::new("SG.my-api-key")?;
///
/// let bounces = client.bounces().list(SuppressionQuery::new()).await?;
/// for bounce in &bounces {
///     client.bounces().delete(&bounce.email).await?;
/// }
///
/// let groups = client.unsubscribe_groups().list().await?;
/// let profile = client.user().profile().await?;
/// ```
#[derive(Debug, Clone)]
pub struct MailClient {
    client: GridClient,
}

impl MailClient {
    /// Create a client for the default API root.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = GridClient::new(api_key)?;
        Ok(Self { client })
    }

    /// Create a client with custom HTTP configuration.
    pub fn with_config(api_key: impl Into<String>, config: ClientConfig) -> Result<Self> {
        let client = GridClient::with_config(api_key, config)?;
        Ok(Self { client })
    }

    /// Create a client against another base URL, such as a regional
    /// endpoint or a local mock server.
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let config = ClientConfig::builder().with_base_url(base_url).build();
        Self::with_config(api_key, config)
    }

    /// Create a client from `GRIDMAIL_API_KEY` and the `GRIDMAIL_*`
    /// configuration variables.
    pub fn from_env() -> Result<Self> {
        let client = GridClient::from_env()?;
        Ok(Self { client })
    }

    /// Wrap an existing dispatcher.
    pub fn from_client(client: GridClient) -> Self {
        Self { client }
    }

    /// The underlying dispatcher.
    pub fn inner(&self) -> &GridClient {
        &self.client
    }

    /// A handle whose calls are all aborted once `token` is cancelled.
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            client: self.client.with_cancellation(token),
        }
    }

    /// Close the underlying transport if this client owns it.
    pub fn close(&self) {
        self.client.close();
    }

    pub fn api_keys(&self) -> ApiKeys {
        ApiKeys::new(self.client.clone())
    }

    pub fn bounces(&self) -> Bounces {
        SuppressionList::new(self.client.clone())
    }

    pub fn blocks(&self) -> Blocks {
        SuppressionList::new(self.client.clone())
    }

    pub fn spam_reports(&self) -> SpamReports {
        SuppressionList::new(self.client.clone())
    }

    pub fn invalid_emails(&self) -> InvalidEmails {
        SuppressionList::new(self.client.clone())
    }

    pub fn global_suppressions(&self) -> GlobalSuppressions {
        GlobalSuppressions::new(self.client.clone())
    }

    pub fn unsubscribe_groups(&self) -> UnsubscribeGroups {
        UnsubscribeGroups::new(self.client.clone())
    }

    /// Addresses unsubscribed from individual groups.
    pub fn suppressions(&self) -> Suppressions {
        Suppressions::new(self.client.clone())
    }

    pub fn categories(&self) -> Categories {
        Categories::new(self.client.clone())
    }

    pub fn statistics(&self) -> Statistics {
        Statistics::new(self.client.clone())
    }

    pub fn user(&self) -> User {
        User::new(self.client.clone())
    }

    pub fn campaigns(&self) -> Campaigns {
        Campaigns::new(self.client.clone())
    }
}
