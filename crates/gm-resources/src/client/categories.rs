//! Category listing.

use gridmail_client::{ApiRequest, GridClient};
use tracing::instrument;

use crate::categories::{Category, CategoryQuery};
use crate::error::Result;

/// Facade over `categories`.
#[derive(Debug, Clone)]
pub struct Categories {
    client: GridClient,
}

impl Categories {
    pub(crate) fn new(client: GridClient) -> Self {
        Self { client }
    }

    /// Names of the categories used on this account.
    #[instrument(skip(self))]
    pub async fn list(&self, query: &CategoryQuery) -> Result<Vec<String>> {
        let request = ApiRequest::get("categories")
            .query_opt("category", query.prefix.as_deref())
            .query_opt("limit", query.limit)
            .query_opt("offset", query.offset);

        let categories: Vec<Category> = self.client.send_json(request).await?;
        Ok(categories.into_iter().map(|c| c.category).collect())
    }
}
