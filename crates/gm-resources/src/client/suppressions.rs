//! Addresses unsubscribed from a single group, under
//! `asm/groups/{group_id}/suppressions`.

use gridmail_client::security::url::encode_segment;
use gridmail_client::{ApiRequest, GridClient};
use tracing::instrument;

use crate::error::Result;
use crate::suppressions::RecipientEmails;
use crate::types::require_non_empty;

/// Facade over group suppressions.
#[derive(Debug, Clone)]
pub struct Suppressions {
    client: GridClient,
}

fn group_path(group_id: i64) -> String {
    format!("asm/groups/{}/suppressions", group_id)
}

impl Suppressions {
    pub(crate) fn new(client: GridClient) -> Self {
        Self { client }
    }

    /// Addresses unsubscribed from the group.
    #[instrument(skip(self))]
    pub async fn list(&self, group_id: i64) -> Result<Vec<String>> {
        self.client
            .send_json(ApiRequest::get(group_path(group_id)))
            .await
            .map_err(Into::into)
    }

    /// Unsubscribe addresses from the group. Returns the addresses the
    /// service recorded.
    #[instrument(skip(self, emails), fields(count = emails.len()))]
    pub async fn add(&self, group_id: i64, emails: &[String]) -> Result<Vec<String>> {
        require_non_empty(emails, "email address")?;
        let body = RecipientEmails {
            recipient_emails: emails.to_vec(),
        };
        let request = ApiRequest::post(group_path(group_id)).json(&body)?;
        let added: RecipientEmails = self.client.send_json(request).await?;
        Ok(added.recipient_emails)
    }

    /// Resubscribe an address to the group.
    #[instrument(skip(self))]
    pub async fn remove(&self, group_id: i64, email: &str) -> Result<()> {
        let path = format!("{}/{}", group_path(group_id), encode_segment(email));
        self.client
            .send_no_content(ApiRequest::delete(path))
            .await
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::super::MailClient;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> MailClient {
        MailClient::with_base_url(server.uri(), "SG.test-key").unwrap()
    }

    #[tokio::test]
    async fn test_group_suppression_flow() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v3/asm/groups/42/suppressions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                "example@example.com",
                "example2@example.com"
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v3/asm/groups/42/suppressions"))
            .and(body_json(serde_json::json!({
                "recipient_emails": ["test1@example.com"]
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "recipient_emails": ["test1@example.com"]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/v3/asm/groups/42/suppressions/test1%40example.com"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let suppressions = client(&mock_server).suppressions();
        assert_eq!(suppressions.list(42).await.unwrap().len(), 2);
        assert_eq!(
            suppressions
                .add(42, &["test1@example.com".to_string()])
                .await
                .unwrap(),
            vec!["test1@example.com"]
        );
        suppressions.remove(42, "test1@example.com").await.unwrap();
    }

    #[tokio::test]
    async fn test_unknown_group() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v3/asm/groups/9/suppressions"))
            .respond_with(ResponseTemplate::new(404).set_body_string(""))
            .mount(&mock_server)
            .await;

        let err = client(&mock_server).suppressions().list(9).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }
}
