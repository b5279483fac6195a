//! Marketing campaigns and their schedules.

use chrono::{DateTime, Utc};
use gridmail_client::{ApiRequest, GridClient};
use tracing::instrument;

use crate::campaigns::{Campaign, CampaignDraft, CampaignSchedule, SendAt, TestRecipients};
use crate::error::{Error, Result};
use crate::types::require_non_empty;

const PATH: &str = "campaigns";

/// Facade over the campaign endpoints.
#[derive(Debug, Clone)]
pub struct Campaigns {
    client: GridClient,
}

fn campaign_path(id: i64) -> String {
    format!("{}/{}", PATH, id)
}

fn schedule_path(id: i64) -> String {
    format!("{}/{}/schedules", PATH, id)
}

impl Campaigns {
    pub(crate) fn new(client: GridClient) -> Self {
        Self { client }
    }

    /// Create a campaign in the `Draft` state.
    #[instrument(skip(self, draft))]
    pub async fn create(&self, draft: &CampaignDraft) -> Result<Campaign> {
        if draft.title.as_deref().is_none_or(|t| t.trim().is_empty()) {
            return Err(Error::invalid_argument("campaign title is required"));
        }
        let request = ApiRequest::post(PATH).json(draft)?;
        self.client.send_json(request).await.map_err(Into::into)
    }

    /// One page of campaigns, newest first.
    #[instrument(skip(self))]
    pub async fn list(&self, limit: Option<u32>, offset: Option<u32>) -> Result<Vec<Campaign>> {
        let request = ApiRequest::get(PATH)
            .query_opt("limit", limit)
            .query_opt("offset", offset);
        self.client
            .send_enveloped(request)
            .await
            .map_err(Into::into)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<Campaign> {
        self.client
            .send_json(ApiRequest::get(campaign_path(id)))
            .await
            .map_err(Into::into)
    }

    /// Change the set fields of a draft campaign.
    #[instrument(skip(self, changes))]
    pub async fn update(&self, id: i64, changes: &CampaignDraft) -> Result<Campaign> {
        if *changes == CampaignDraft::default() {
            return Err(Error::invalid_argument("campaign update has no fields set"));
        }
        let request = ApiRequest::patch(campaign_path(id)).json(changes)?;
        self.client.send_json(request).await.map_err(Into::into)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.client
            .send_no_content(ApiRequest::delete(campaign_path(id)))
            .await
            .map_err(Into::into)
    }

    /// Send the campaign immediately.
    #[instrument(skip(self))]
    pub async fn send_now(&self, id: i64) -> Result<CampaignSchedule> {
        let request = ApiRequest::post(format!("{}/now", schedule_path(id)));
        self.client.send_json(request).await.map_err(Into::into)
    }

    /// Schedule the campaign for `send_at`.
    #[instrument(skip(self))]
    pub async fn schedule(&self, id: i64, send_at: DateTime<Utc>) -> Result<CampaignSchedule> {
        let request = ApiRequest::post(schedule_path(id)).json(&SendAt { send_at })?;
        self.client.send_json(request).await.map_err(Into::into)
    }

    /// Move an already scheduled campaign to `send_at`.
    #[instrument(skip(self))]
    pub async fn reschedule(&self, id: i64, send_at: DateTime<Utc>) -> Result<CampaignSchedule> {
        let request = ApiRequest::patch(schedule_path(id)).json(&SendAt { send_at })?;
        self.client.send_json(request).await.map_err(Into::into)
    }

    /// When the campaign is scheduled to go out; `None` if it is not
    /// scheduled.
    #[instrument(skip(self))]
    pub async fn scheduled_time(&self, id: i64) -> Result<Option<DateTime<Utc>>> {
        let schedule: CampaignSchedule = self
            .client
            .send_json(ApiRequest::get(schedule_path(id)))
            .await?;
        Ok(schedule.send_at)
    }

    /// Cancel a scheduled send; the campaign returns to `Draft`.
    #[instrument(skip(self))]
    pub async fn unschedule(&self, id: i64) -> Result<()> {
        self.client
            .send_no_content(ApiRequest::delete(schedule_path(id)))
            .await
            .map_err(Into::into)
    }

    /// Send a test copy to the given addresses.
    #[instrument(skip(self, emails), fields(count = emails.len()))]
    pub async fn send_test(&self, id: i64, emails: &[String]) -> Result<()> {
        require_non_empty(emails, "test recipient")?;
        let request = ApiRequest::post(format!("{}/test", schedule_path(id)))
            .json(&TestRecipients { to: emails })?;
        self.client
            .send_no_content(request)
            .await
            .map_err(Into::into)
    }
}
