//! Global unsubscribes: addresses that receive no mail at all.

use gridmail_client::security::url::encode_segment;
use gridmail_client::{ApiRequest, GridClient};
use tracing::instrument;

use crate::error::Result;
use crate::suppressions::{GlobalSuppression, GlobalSuppressionLookup, RecipientEmails};
use crate::types::{require_non_empty, SuppressionQuery};

const LIST_PATH: &str = "suppression/unsubscribes";
const GLOBAL_PATH: &str = "asm/suppressions/global";

/// Facade over the global unsubscribe endpoints.
#[derive(Debug, Clone)]
pub struct GlobalSuppressions {
    client: GridClient,
}

impl GlobalSuppressions {
    pub(crate) fn new(client: GridClient) -> Self {
        Self { client }
    }

    fn address_path(email: &str) -> String {
        format!("{}/{}", GLOBAL_PATH, encode_segment(email))
    }

    /// List globally unsubscribed addresses.
    #[instrument(skip(self))]
    pub async fn list(&self, query: SuppressionQuery) -> Result<Vec<GlobalSuppression>> {
        let request = query.apply(ApiRequest::get(LIST_PATH))?;
        self.client.send_json(request).await.map_err(Into::into)
    }

    /// Whether `email` is globally unsubscribed.
    #[instrument(skip(self))]
    pub async fn is_suppressed(&self, email: &str) -> Result<bool> {
        let lookup: GlobalSuppressionLookup = self
            .client
            .send_json(ApiRequest::get(Self::address_path(email)))
            .await?;
        Ok(lookup
            .recipient_email
            .is_some_and(|found| found.eq_ignore_ascii_case(email)))
    }

    /// Unsubscribe addresses from all mail. Returns the addresses the service
    /// recorded.
    #[instrument(skip(self, emails), fields(count = emails.len()))]
    pub async fn add(&self, emails: &[String]) -> Result<Vec<String>> {
        require_non_empty(emails, "email address")?;
        let body = RecipientEmails {
            recipient_emails: emails.to_vec(),
        };
        let request = ApiRequest::post(GLOBAL_PATH).json(&body)?;
        let added: RecipientEmails = self.client.send_json(request).await?;
        Ok(added.recipient_emails)
    }

    /// Resubscribe an address.
    #[instrument(skip(self))]
    pub async fn remove(&self, email: &str) -> Result<()> {
        self.client
            .send_no_content(ApiRequest::delete(Self::address_path(email)))
            .await
            .map_err(Into::into)
    }
}
