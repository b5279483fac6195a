//! The account owner: profile, account, email, username, credits and
//! password, all under `user`.

use gridmail_client::{ApiRequest, GridClient};
use tracing::instrument;

use crate::error::{Error, Result};
use crate::user::{
    Account, Credits, EmailAddress, PasswordChange, UserProfile, Username, UsernameChange,
};

/// Facade over the `user` endpoints.
#[derive(Debug, Clone)]
pub struct User {
    client: GridClient,
}

impl User {
    pub(crate) fn new(client: GridClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn profile(&self) -> Result<UserProfile> {
        self.client
            .send_json(ApiRequest::get("user/profile"))
            .await
            .map_err(Into::into)
    }

    /// Change the set fields of the profile and return the stored profile.
    #[instrument(skip(self, update))]
    pub async fn update_profile(&self, update: &UserProfile) -> Result<UserProfile> {
        if *update == UserProfile::default() {
            return Err(Error::invalid_argument("profile update has no fields set"));
        }
        let request = ApiRequest::patch("user/profile").json(update)?;
        self.client.send_json(request).await.map_err(Into::into)
    }

    #[instrument(skip(self))]
    pub async fn account(&self) -> Result<Account> {
        self.client
            .send_json(ApiRequest::get("user/account"))
            .await
            .map_err(Into::into)
    }

    /// The account's contact email address.
    #[instrument(skip(self))]
    pub async fn email(&self) -> Result<String> {
        let address: EmailAddress = self.client.send_json(ApiRequest::get("user/email")).await?;
        Ok(address.email)
    }

    #[instrument(skip(self))]
    pub async fn update_email(&self, email: &str) -> Result<String> {
        if !email.contains('@') {
            return Err(Error::invalid_argument(format!(
                "'{}' is not an email address",
                email
            )));
        }
        let body = EmailAddress {
            email: email.to_string(),
        };
        let request = ApiRequest::put("user/email").json(&body)?;
        let address: EmailAddress = self.client.send_json(request).await?;
        Ok(address.email)
    }

    #[instrument(skip(self))]
    pub async fn username(&self) -> Result<Username> {
        self.client
            .send_json(ApiRequest::get("user/username"))
            .await
            .map_err(Into::into)
    }

    #[instrument(skip(self))]
    pub async fn update_username(&self, username: &str) -> Result<Username> {
        if username.trim().is_empty() {
            return Err(Error::invalid_argument("username must not be empty"));
        }
        let request = ApiRequest::put("user/username").json(&UsernameChange { username })?;
        self.client.send_json(request).await.map_err(Into::into)
    }

    /// Email credit balance for the current period.
    #[instrument(skip(self))]
    pub async fn credits(&self) -> Result<Credits> {
        self.client
            .send_json(ApiRequest::get("user/credits"))
            .await
            .map_err(Into::into)
    }

    #[instrument(skip_all)]
    pub async fn update_password(&self, old_password: &str, new_password: &str) -> Result<()> {
        if new_password.is_empty() {
            return Err(Error::invalid_argument("new password must not be empty"));
        }
        let body = PasswordChange {
            new_password,
            old_password,
        };
        let request = ApiRequest::put("user/password").json(&body)?;
        self.client
            .send_no_content(request)
            .await
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::super::MailClient;
    use crate::user::UserProfile;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> MailClient {
        MailClient::with_base_url(server.uri(), "SG.test-key").unwrap()
    }

    #[tokio::test]
    async fn test_profile_roundtrip() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v3/user/profile"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "address": "814 West Chapman Avenue",
                "city": "Orange",
                "company": "Example Inc.",
                "country": "US",
                "first_name": "Jane",
                "last_name": "Doe",
                "phone": "555-555-5555",
                "state": "CA",
                "website": "https://example.com",
                "zip": "92868"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/v3/user/profile"))
            .and(body_json(serde_json::json!({"city": "Denver"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "city": "Denver"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let user = client(&mock_server).user();
        let profile = user.profile().await.unwrap();
        assert_eq!(profile.first_name.as_deref(), Some("Jane"));

        let update = UserProfile {
            city: Some("Denver".to_string()),
            ..UserProfile::default()
        };
        let updated = user.update_profile(&update).await.unwrap();
        assert_eq!(updated.city.as_deref(), Some("Denver"));
    }

    #[tokio::test]
    async fn test_empty_profile_update_rejected() {
        let mock_server = MockServer::start().await;
        assert!(client(&mock_server)
            .user()
            .update_profile(&UserProfile::default())
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_account_and_credits() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v3/user/account"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "type": "paid",
                "reputation": 98.5
            })))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v3/user/credits"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "remain": 150, "total": 200, "overage": 0, "used": 50,
                "last_reset": "2024-05-01", "next_reset": "2024-06-01",
                "reset_frequency": "monthly"
            })))
            .mount(&mock_server)
            .await;

        let user = client(&mock_server).user();
        assert_eq!(user.account().await.unwrap().account_type, "paid");
        assert_eq!(user.credits().await.unwrap().used, 50);
    }

    #[tokio::test]
    async fn test_email_and_username() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v3/user/email"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "email": "owner@example.com"
            })))
            .mount(&mock_server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/v3/user/email"))
            .and(body_json(serde_json::json!({"email": "new@example.com"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "email": "new@example.com"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v3/user/username"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "username": "owner", "user_id": 1
            })))
            .mount(&mock_server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/v3/user/username"))
            .and(body_json(serde_json::json!({"username": "renamed"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "username": "renamed"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let user = client(&mock_server).user();
        assert_eq!(user.email().await.unwrap(), "owner@example.com");
        assert_eq!(
            user.update_email("new@example.com").await.unwrap(),
            "new@example.com"
        );
        assert_eq!(user.username().await.unwrap().user_id, Some(1));
        assert_eq!(
            user.update_username("renamed").await.unwrap().username,
            "renamed"
        );
        assert!(user.update_email("not-an-address").await.is_err());
    }

    #[tokio::test]
    async fn test_update_password() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/v3/user/password"))
            .and(body_json(serde_json::json!({
                "new_password": "n3w-secret",
                "old_password": "old-secret"
            })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        client(&mock_server)
            .user()
            .update_password("old-secret", "n3w-secret")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_wrong_password_is_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/v3/user/password"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "errors": [{"field": "old_password", "message": "old password is incorrect"}]
            })))
            .mount(&mock_server)
            .await;

        let err = client(&mock_server)
            .user()
            .update_password("wrong", "n3w-secret")
            .await
            .unwrap_err();
        let client_err = err.client_error().unwrap();
        match &client_err.kind {
            gridmail_client::ErrorKind::Api { field, message, .. } => {
                assert_eq!(field.as_deref(), Some("old_password"));
                assert_eq!(message, "old password is incorrect");
            }
            other => panic!("unexpected error kind: {:?}", other),
        }
    }
}
