//! Email statistics types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Statistics for one period (a day, or a week/month when aggregated).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Statistic {
    pub date: NaiveDate,
    #[serde(default)]
    pub stats: Vec<StatisticEntry>,
}

/// Metrics for one dimension value (a category, subuser, country, device...).
///
/// Global statistics carry neither `kind` nor `name`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StatisticEntry {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub metrics: Metrics,
}

/// Event counters. Dimensions that do not track a counter report zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Metrics {
    pub blocks: u64,
    pub bounce_drops: u64,
    pub bounces: u64,
    pub clicks: u64,
    pub deferred: u64,
    pub delivered: u64,
    pub invalid_emails: u64,
    pub opens: u64,
    pub processed: u64,
    pub requests: u64,
    pub spam_report_drops: u64,
    pub spam_reports: u64,
    pub unique_clicks: u64,
    pub unique_opens: u64,
    pub unsubscribe_drops: u64,
    pub unsubscribes: u64,
}

impl Metrics {
    /// Share of delivered messages opened at least once, in percent.
    pub fn unique_open_rate(&self) -> Option<f64> {
        ratio(self.unique_opens, self.delivered)
    }

    /// Share of delivered messages clicked at least once, in percent.
    pub fn unique_click_rate(&self) -> Option<f64> {
        ratio(self.unique_clicks, self.delivered)
    }

    /// Share of requests that bounced, in percent.
    pub fn bounce_rate(&self) -> Option<f64> {
        ratio(self.bounces, self.requests)
    }
}

fn ratio(part: u64, whole: u64) -> Option<f64> {
    if whole == 0 {
        None
    } else {
        Some(part as f64 / whole as f64 * 100.0)
    }
}
