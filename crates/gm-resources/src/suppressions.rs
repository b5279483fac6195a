//! Suppression list types: bounces, blocks, spam reports, invalid emails and
//! global unsubscribes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An address that bounced.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Bounce {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created: DateTime<Utc>,
    pub email: String,
    #[serde(default)]
    pub reason: Option<String>,
    /// Enhanced SMTP status code, e.g. `5.1.1`.
    #[serde(default)]
    pub status: Option<String>,
}

/// An address whose receiving server blocked delivery.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Block {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created: DateTime<Utc>,
    pub email: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// A recipient that reported a message as spam.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SpamReport {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created: DateTime<Utc>,
    pub email: String,
    /// Sending IP the report was filed against.
    #[serde(default)]
    pub ip: Option<String>,
}

/// A malformed or non-existent address.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct InvalidEmail {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created: DateTime<Utc>,
    pub email: String,
    #[serde(default)]
    pub reason: Option<String>,
}

/// An address unsubscribed from all mail.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GlobalSuppression {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created: DateTime<Utc>,
    pub email: String,
}

/// Body for removing entries from a suppression list.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub(crate) enum DeleteSuppressions<'a> {
    All { delete_all: bool },
    Emails { emails: &'a [String] },
}

/// `{"recipient_emails": [...]}`, used both ways by the unsubscribe endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RecipientEmails {
    pub recipient_emails: Vec<String>,
}

/// Answer of the single-address global suppression lookup; empty when the
/// address is not suppressed.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GlobalSuppressionLookup {
    #[serde(default)]
    pub recipient_email: Option<String>,
}
