//! Category types.

use serde::{Deserialize, Serialize};

/// A category name as listed by the service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Category {
    pub category: String,
}

/// Filter and paging for the category listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryQuery {
    /// Only return categories starting with this prefix.
    pub prefix: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl CategoryQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
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
}
