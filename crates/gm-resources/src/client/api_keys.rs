//! API key management under `api_keys`.

use gridmail_client::security::url::encode_segment;
use gridmail_client::{ApiRequest, GridClient};
use tracing::instrument;

use crate::api_keys::{ApiKey, ApiKeyRequest};
use crate::error::{Error, Result};

const PATH: &str = "api_keys";

/// Facade over the API key endpoints.
#[derive(Debug, Clone)]
pub struct ApiKeys {
    client: GridClient,
}

impl ApiKeys {
    pub(crate) fn new(client: GridClient) -> Self {
        Self { client }
    }

    fn key_path(id: &str) -> String {
        format!("{}/{}", PATH, encode_segment(id))
    }

    /// Fetch a single key (without its secret).
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<ApiKey> {
        self.client
            .send_json(ApiRequest::get(Self::key_path(id)))
            .await
            .map_err(Into::into)
    }

    /// List keys, optionally capped at `limit` entries.
    #[instrument(skip(self))]
    pub async fn list(&self, limit: Option<u32>) -> Result<Vec<ApiKey>> {
        let request = ApiRequest::get(PATH).query_opt("limit", limit);
        self.client
            .send_enveloped(request)
            .await
            .map_err(Into::into)
    }

    /// Create a key. The returned value is the only one carrying the secret.
    ///
    /// An empty `scopes` slice lets the service grant its default scopes.
    #[instrument(skip(self, scopes))]
    pub async fn create(&self, name: &str, scopes: &[String]) -> Result<ApiKey> {
        require_name(name)?;
        let body = ApiKeyRequest {
            name,
            scopes: (!scopes.is_empty()).then_some(scopes),
        };
        let request = ApiRequest::post(PATH).json(&body)?;
        self.client.send_json(request).await.map_err(Into::into)
    }

    /// Rename a key, or replace its name and scopes when `scopes` is given.
    ///
    /// A rename is a PATCH; replacing scopes requires a PUT of the whole key.
    #[instrument(skip(self, scopes))]
    pub async fn update(&self, id: &str, name: &str, scopes: Option<&[String]>) -> Result<ApiKey> {
        require_name(name)?;
        let body = ApiKeyRequest { name, scopes };
        let request = match scopes {
            Some(_) => ApiRequest::put(Self::key_path(id)),
            None => ApiRequest::patch(Self::key_path(id)),
        }
        .json(&body)?;
        self.client.send_json(request).await.map_err(Into::into)
    }

    /// Revoke a key.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .send_no_content(ApiRequest::delete(Self::key_path(id)))
            .await
            .map_err(Into::into)
    }
}

fn require_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::invalid_argument("API key name must not be empty"));
    }
    Ok(())
}
