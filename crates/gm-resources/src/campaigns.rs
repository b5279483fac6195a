//! Marketing campaign types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum CampaignStatus {
    Draft,
    Scheduled,
    #[serde(rename = "In Progress")]
    InProgress,
    Sent,
    Canceled,
    #[serde(other)]
    Unknown,
}

/// A campaign as stored by the service.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Campaign {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub sender_id: Option<i64>,
    #[serde(default)]
    pub list_ids: Vec<i64>,
    #[serde(default)]
    pub segment_ids: Vec<i64>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub suppression_group_id: Option<i64>,
    #[serde(default)]
    pub custom_unsubscribe_url: Option<String>,
    #[serde(default)]
    pub ip_pool: Option<String>,
    #[serde(default)]
    pub html_content: Option<String>,
    #[serde(default)]
    pub plain_content: Option<String>,
    #[serde(default)]
    pub status: Option<CampaignStatus>,
}

/// Fields of a campaign to create or update; unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CampaignDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suppression_group_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_unsubscribe_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_pool: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plain_content: Option<String>,
}

impl CampaignDraft {
    /// Start a draft with the required title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn sender_id(mut self, sender_id: i64) -> Self {
        self.sender_id = Some(sender_id);
        self
    }

    pub fn list_ids(mut self, list_ids: Vec<i64>) -> Self {
        self.list_ids = Some(list_ids);
        self
    }

    pub fn categories(mut self, categories: Vec<String>) -> Self {
        self.categories = Some(categories);
        self
    }

    pub fn suppression_group_id(mut self, group_id: i64) -> Self {
        self.suppression_group_id = Some(group_id);
        self
    }

    pub fn html_content(mut self, html: impl Into<String>) -> Self {
        self.html_content = Some(html.into());
        self
    }

    pub fn plain_content(mut self, text: impl Into<String>) -> Self {
        self.plain_content = Some(text.into());
        self
    }
}

/// Scheduling state returned by the schedule endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CampaignSchedule {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub send_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<CampaignStatus>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SendAt {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub send_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct TestRecipients<'a> {
    pub to: &'a [String],
}
