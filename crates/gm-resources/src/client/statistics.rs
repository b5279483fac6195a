//! Email statistics: global, per category, per subuser and broken down by
//! geography, device, client, browser and mailbox provider.

use gridmail_client::{ApiRequest, GridClient};
use tracing::instrument;

use crate::error::Result;
use crate::statistics::Statistic;
use crate::types::{require_non_empty, StatsQuery};

/// Facade over the statistics endpoints.
#[derive(Debug, Clone)]
pub struct Statistics {
    client: GridClient,
}

impl Statistics {
    pub(crate) fn new(client: GridClient) -> Self {
        Self { client }
    }

    async fn fetch(&self, request: ApiRequest, query: &StatsQuery) -> Result<Vec<Statistic>> {
        let request = query.apply(request)?;
        self.client.send_json(request).await.map_err(Into::into)
    }

    /// Account-wide statistics.
    #[instrument(skip(self))]
    pub async fn global(&self, query: &StatsQuery) -> Result<Vec<Statistic>> {
        self.fetch(ApiRequest::get("stats"), query).await
    }

    /// Statistics for the named categories.
    #[instrument(skip(self))]
    pub async fn categories(&self, names: &[&str], query: &StatsQuery) -> Result<Vec<Statistic>> {
        require_non_empty(names, "category")?;
        let request = ApiRequest::get("categories/stats").query_each("categories", names);
        self.fetch(request, query).await
    }

    /// Statistics for the named subusers.
    #[instrument(skip(self))]
    pub async fn subusers(&self, names: &[&str], query: &StatsQuery) -> Result<Vec<Statistic>> {
        require_non_empty(names, "subuser")?;
        let request = ApiRequest::get("subusers/stats").query_each("subusers", names);
        self.fetch(request, query).await
    }

    /// Statistics by country and state/province. `country` is an ISO 3166
    /// code such as `US` or `CA`.
    #[instrument(skip(self))]
    pub async fn countries(
        &self,
        country: Option<&str>,
        query: &StatsQuery,
    ) -> Result<Vec<Statistic>> {
        let request = ApiRequest::get("geo/stats").query_opt("country", country);
        self.fetch(request, query).await
    }

    /// Statistics by device type.
    #[instrument(skip(self))]
    pub async fn devices(&self, query: &StatsQuery) -> Result<Vec<Statistic>> {
        self.fetch(ApiRequest::get("devices/stats"), query).await
    }

    /// Statistics by email client.
    #[instrument(skip(self))]
    pub async fn clients(&self, query: &StatsQuery) -> Result<Vec<Statistic>> {
        self.fetch(ApiRequest::get("clients/stats"), query).await
    }

    /// Statistics by browser.
    #[instrument(skip(self))]
    pub async fn browsers(&self, query: &StatsQuery) -> Result<Vec<Statistic>> {
        self.fetch(ApiRequest::get("browsers/stats"), query).await
    }

    /// Statistics by recipient mailbox provider.
    #[instrument(skip(self))]
    pub async fn mailbox_providers(&self, query: &StatsQuery) -> Result<Vec<Statistic>> {
        self.fetch(ApiRequest::get("mailbox_providers/stats"), query)
            .await
    }
}
