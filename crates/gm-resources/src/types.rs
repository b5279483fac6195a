//! Query parameter types shared by several resources.

use chrono::{DateTime, NaiveDate, Utc};
use gridmail_client::ApiRequest;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Date format used by statistics endpoints.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Filter for suppression list endpoints (bounces, blocks, spam reports,
/// invalid emails, global unsubscribes).
///
/// Every bound is optional; an omitted bound is left out of the query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuppressionQuery {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl SuppressionQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start(mut self, start: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_end(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Append `start_time`/`end_time` (unix seconds), `limit` and `offset`.
    pub(crate) fn apply(&self, request: ApiRequest) -> Result<ApiRequest> {
        if let (Some(start), Some(end)) = (self.start, self.end) {
            if start > end {
                return Err(Error::invalid_argument(format!(
                    "start ({}) is after end ({})",
                    start, end
                )));
            }
        }

        Ok(request
            .query_opt("start_time", self.start.map(|d| d.timestamp()))
            .query_opt("end_time", self.end.map(|d| d.timestamp()))
            .query_opt("limit", self.limit)
            .query_opt("offset", self.offset))
    }
}

/// How statistics are grouped over time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateBy {
    /// One entry per day, the service default.
    #[default]
    None,
    Day,
    Week,
    Month,
}

impl AggregateBy {
    fn as_param(&self) -> Option<&'static str> {
        match self {
            AggregateBy::None => None,
            AggregateBy::Day => Some("day"),
            AggregateBy::Week => Some("week"),
            AggregateBy::Month => Some("month"),
        }
    }
}

/// Date range and grouping for statistics endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsQuery {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
    pub aggregated_by: AggregateBy,
}

impl StatsQuery {
    pub fn new(start: NaiveDate) -> Self {
        Self {
            start,
            end: None,
            aggregated_by: AggregateBy::None,
        }
    }

    pub fn with_end(mut self, end: NaiveDate) -> Self {
        self.end = Some(end);
        self
    }

    pub fn aggregated_by(mut self, aggregated_by: AggregateBy) -> Self {
        self.aggregated_by = aggregated_by;
        self
    }

    /// Append `start_date`, `end_date` and `aggregated_by`.
    pub(crate) fn apply(&self, request: ApiRequest) -> Result<ApiRequest> {
        if let Some(end) = self.end {
            if end < self.start {
                return Err(Error::invalid_argument(format!(
                    "end date {} is before start date {}",
                    end, self.start
                )));
            }
        }

        Ok(request
            .query("start_date", self.start.format(DATE_FORMAT))
            .query_opt("end_date", self.end.map(|d| d.format(DATE_FORMAT)))
            .query_opt("aggregated_by", self.aggregated_by.as_param()))
    }
}

/// Reject an empty list of values the service requires at least one of.
pub(crate) fn require_non_empty<T>(values: &[T], what: &str) -> Result<()> {
    if values.is_empty() {
        return Err(Error::invalid_argument(format!(
            "at least one {} is required",
            what
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn pairs(request: &ApiRequest) -> Vec<(&str, &str)> {
        request
            .query_params()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    #[test]
    fn test_suppression_query_omits_missing_bounds() {
        let request = SuppressionQuery::new()
            .apply(ApiRequest::get("suppression/bounces"))
            .unwrap();
        assert!(request.query_params().is_empty());
    }

    #[test]
    fn test_suppression_query_uses_unix_seconds() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let request = SuppressionQuery::new()
            .with_start(start)
            .with_limit(25)
            .apply(ApiRequest::get("suppression/bounces"))
            .unwrap();

        assert_eq!(
            pairs(&request),
            vec![("start_time", "1704067200"), ("limit", "25")]
        );
    }

    #[test]
    fn test_suppression_query_rejects_inverted_range() {
        let start = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let err = SuppressionQuery::new()
            .with_start(start)
            .with_end(end)
            .apply(ApiRequest::get("x"))
            .unwrap_err();
        assert!(err.to_string().contains("is after end"));
    }

    #[test]
    fn test_stats_query_formats_dates() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let request = StatsQuery::new(start)
            .with_end(end)
            .aggregated_by(AggregateBy::Week)
            .apply(ApiRequest::get("stats"))
            .unwrap();

        assert_eq!(
            pairs(&request),
            vec![
                ("start_date", "2024-03-05"),
                ("end_date", "2024-03-31"),
                ("aggregated_by", "week"),
            ]
        );
    }

    #[test]
    fn test_stats_query_default_aggregation_is_omitted() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let request = StatsQuery::new(start)
            .apply(ApiRequest::get("stats"))
            .unwrap();
        assert_eq!(pairs(&request), vec![("start_date", "2024-03-05")]);
    }

    #[test]
    fn test_stats_query_rejects_inverted_range() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert!(StatsQuery::new(start)
            .with_end(end)
            .apply(ApiRequest::get("stats"))
            .is_err());
    }

    #[test]
    fn test_require_non_empty() {
        assert!(require_non_empty(&["a"], "category").is_ok());
        let err = require_non_empty::<&str>(&[], "category").unwrap_err();
        assert_eq!(err.to_string(), "Invalid argument: at least one category is required");
    }
}
