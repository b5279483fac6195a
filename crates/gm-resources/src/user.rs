//! Account owner types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Profile of the account owner.
///
/// Also used as the body of a profile update, where unset fields are left
/// unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
}

/// Account type and sender reputation.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Account {
    #[serde(rename = "type")]
    pub account_type: String,
    pub reputation: f64,
}

/// Login name and numeric user id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Username {
    pub username: String,
    #[serde(default)]
    pub user_id: Option<i64>,
}

/// Email credit balance for the current period.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Credits {
    pub remain: i64,
    pub total: i64,
    pub overage: i64,
    pub used: i64,
    #[serde(default)]
    pub last_reset: Option<NaiveDate>,
    #[serde(default)]
    pub next_reset: Option<NaiveDate>,
    #[serde(default)]
    pub reset_frequency: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct EmailAddress {
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct UsernameChange<'a> {
    pub username: &'a str,
}

#[derive(Clone, Serialize)]
pub(crate) struct PasswordChange<'a> {
    pub new_password: &'a str,
    pub old_password: &'a str,
}
