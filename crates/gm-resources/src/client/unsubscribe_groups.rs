//! Unsubscribe groups under `asm/groups`.

use gridmail_client::{ApiRequest, GridClient};
use tracing::instrument;

use crate::error::{Error, Result};
use crate::unsubscribe_groups::{
    GroupUpdate, NewGroup, SuppressionGroup, MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH,
};

const PATH: &str = "asm/groups";

/// Facade over the unsubscribe group endpoints.
#[derive(Debug, Clone)]
pub struct UnsubscribeGroups {
    client: GridClient,
}

impl UnsubscribeGroups {
    pub(crate) fn new(client: GridClient) -> Self {
        Self { client }
    }

    /// List all groups with their unsubscribe counts.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<SuppressionGroup>> {
        self.client
            .send_json(ApiRequest::get(PATH))
            .await
            .map_err(Into::into)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, group_id: i64) -> Result<SuppressionGroup> {
        self.client
            .send_json(ApiRequest::get(format!("{}/{}", PATH, group_id)))
            .await
            .map_err(Into::into)
    }

    /// Create a group. Names are limited to 30 characters and descriptions
    /// to 100.
    #[instrument(skip(self, description))]
    pub async fn create(
        &self,
        name: &str,
        description: &str,
        is_default: bool,
    ) -> Result<SuppressionGroup> {
        validate_name(name)?;
        validate_description(description)?;

        let body = NewGroup {
            name,
            description,
            is_default,
        };
        let request = ApiRequest::post(PATH).json(&body)?;
        self.client.send_json(request).await.map_err(Into::into)
    }

    /// Change some fields of a group.
    #[instrument(skip(self))]
    pub async fn update(&self, group_id: i64, update: &GroupUpdate) -> Result<SuppressionGroup> {
        if update.is_empty() {
            return Err(Error::invalid_argument("group update has no fields set"));
        }
        if let Some(name) = &update.name {
            validate_name(name)?;
        }
        if let Some(description) = &update.description {
            validate_description(description)?;
        }

        let request = ApiRequest::patch(format!("{}/{}", PATH, group_id)).json(update)?;
        self.client.send_json(request).await.map_err(Into::into)
    }

    /// Delete a group. Addresses suppressed through it are resubscribed.
    #[instrument(skip(self))]
    pub async fn delete(&self, group_id: i64) -> Result<()> {
        self.client
            .send_no_content(ApiRequest::delete(format!("{}/{}", PATH, group_id)))
            .await
            .map_err(Into::into)
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::invalid_argument("group name must not be empty"));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(Error::invalid_argument(format!(
            "group name exceeds {} characters",
            MAX_NAME_LENGTH
        )));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<()> {
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(Error::invalid_argument(format!(
            "group description exceeds {} characters",
            MAX_DESCRIPTION_LENGTH
        )));
    }
    Ok(())
}
