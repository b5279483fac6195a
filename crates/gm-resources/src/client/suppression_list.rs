//! Bounces, blocks, spam reports and invalid emails share one endpoint
//! shape under `suppression/{list}`.

use std::marker::PhantomData;

use gridmail_client::security::url::encode_segment;
use gridmail_client::{ApiRequest, GridClient};
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::error::Result;
use crate::suppressions::{Block, Bounce, DeleteSuppressions, InvalidEmail, SpamReport};
use crate::types::{require_non_empty, SuppressionQuery};

/// An entry type stored in one of the suppression lists.
pub trait SuppressionEntry: DeserializeOwned + Send {
    /// Path of the list relative to the API root.
    const PATH: &'static str;
}

impl SuppressionEntry for Bounce {
    const PATH: &'static str = "suppression/bounces";
}

impl SuppressionEntry for Block {
    const PATH: &'static str = "suppression/blocks";
}

impl SuppressionEntry for SpamReport {
    const PATH: &'static str = "suppression/spam_reports";
}

impl SuppressionEntry for InvalidEmail {
    const PATH: &'static str = "suppression/invalid_emails";
}

/// Facade over one suppression list.
#[derive(Debug, Clone)]
pub struct SuppressionList<T> {
    client: GridClient,
    _entry: PhantomData<fn() -> T>,
}

/// `suppression/bounces`
pub type Bounces = SuppressionList<Bounce>;
/// `suppression/blocks`
pub type Blocks = SuppressionList<Block>;
/// `suppression/spam_reports`
pub type SpamReports = SuppressionList<SpamReport>;
/// `suppression/invalid_emails`
pub type InvalidEmails = SuppressionList<InvalidEmail>;

impl<T: SuppressionEntry> SuppressionList<T> {
    pub(crate) fn new(client: GridClient) -> Self {
        Self {
            client,
            _entry: PhantomData,
        }
    }

    fn entry_path(email: &str) -> String {
        format!("{}/{}", T::PATH, encode_segment(email))
    }

    /// List entries, optionally bounded by creation time.
    ///
    /// Omitted bounds are not sent, so the whole list is returned.
    #[instrument(skip(self), fields(list = T::PATH))]
    pub async fn list(&self, query: SuppressionQuery) -> Result<Vec<T>> {
        let request = query.apply(ApiRequest::get(T::PATH))?;
        self.client.send_json(request).await.map_err(Into::into)
    }

    /// Entries recorded for a single address.
    #[instrument(skip(self), fields(list = T::PATH))]
    pub async fn get(&self, email: &str) -> Result<Vec<T>> {
        self.client
            .send_json(ApiRequest::get(Self::entry_path(email)))
            .await
            .map_err(Into::into)
    }

    /// Remove a single address from the list.
    #[instrument(skip(self), fields(list = T::PATH))]
    pub async fn delete(&self, email: &str) -> Result<()> {
        self.client
            .send_no_content(ApiRequest::delete(Self::entry_path(email)))
            .await
            .map_err(Into::into)
    }

    /// Remove several addresses in one call.
    #[instrument(skip(self, emails), fields(list = T::PATH, count = emails.len()))]
    pub async fn delete_many(&self, emails: &[String]) -> Result<()> {
        require_non_empty(emails, "email address")?;
        let request = ApiRequest::delete(T::PATH).json(&DeleteSuppressions::Emails { emails })?;
        self.client
            .send_no_content(request)
            .await
            .map_err(Into::into)
    }

    /// Empty the whole list.
    #[instrument(skip(self), fields(list = T::PATH))]
    pub async fn delete_all(&self) -> Result<()> {
        let request =
            ApiRequest::delete(T::PATH).json(&DeleteSuppressions::All { delete_all: true })?;
        self.client
            .send_no_content(request)
            .await
            .map_err(Into::into)
    }
}
