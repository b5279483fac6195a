//! Unsubscribe (suppression) group types.

use serde::{Deserialize, Serialize};

/// Maximum length of a group name accepted by the service.
pub const MAX_NAME_LENGTH: usize = 30;

/// Maximum length of a group description accepted by the service.
pub const MAX_DESCRIPTION_LENGTH: usize = 100;

/// A group recipients can unsubscribe from.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SuppressionGroup {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_default: bool,
    /// Number of unsubscribed addresses; only present in list responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unsubscribes: Option<u64>,
}

/// Fields to create a group with.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct NewGroup<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub is_default: bool,
}

/// Partial update of a group; unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

impl GroupUpdate {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_default(mut self, is_default: bool) -> Self {
        self.is_default = Some(is_default);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.is_default.is_none()
    }
}
