use gridmail::{ClientConfig, GridClient, MailClient};
use wiremock::MockServer;

pub const API_KEY: &str = "SG.integration-key.integration-secret";

/// Install a test-writer subscriber once per process; `RUST_LOG` selects
/// the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Start a mock server and a dispatcher pointed at it.
pub async fn dispatcher() -> (MockServer, GridClient) {
    init_tracing();
    let server = MockServer::start().await;
    let config = ClientConfig::builder().with_base_url(server.uri()).build();
    let client = GridClient::with_config(API_KEY, config).expect("Failed to create client");
    (server, client)
}

/// Start a mock server and a facade client pointed at it.
pub async fn mail_client() -> (MockServer, MailClient) {
    let (server, client) = dispatcher().await;
    (server, MailClient::from_client(client))
}
