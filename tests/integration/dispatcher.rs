//! Dispatcher behavior through the public `gridmail` surface.

use std::time::Duration;

use super::common::{dispatcher, init_tracing, API_KEY};
use gridmail::client::ErrorKind;
use gridmail::{
    ApiRequest, CancellationToken, ClientConfig, GridClient, RequestMethod, ResponseExt,
};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

// ============================================================================
// Verb dispatch
// ============================================================================

#[tokio::test]
async fn test_post_sends_json_and_default_headers() {
    let (server, client) = dispatcher().await;

    Mock::given(method("POST"))
        .and(path("/v3/myendpoint"))
        .and(header("authorization", format!("Bearer {}", API_KEY).as_str()))
        .and(header("accept", "application/json"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({"name": "value"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"id": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let response = client
        .post("/myendpoint", Some(&serde_json::json!({"name": "value"})))
        .await
        .expect("POST should not fail");
    assert_eq!(response.status(), 201);

    let received = server.received_requests().await.unwrap();
    let user_agent = received[0].headers.get("user-agent").unwrap().to_str().unwrap();
    assert!(user_agent.starts_with("gridmail/"));
}

#[tokio::test]
async fn test_every_verb_reaches_the_same_url() {
    let (server, client) = dispatcher().await;

    for verb in ["GET", "POST", "PUT", "PATCH", "DELETE"] {
        Mock::given(method(verb))
            .and(path("/v3/templates/abc"))
            .respond_with(ResponseTemplate::new(200))
            .expect(2)
            .mount(&server)
            .await;
    }

    for p in ["templates/abc", "/templates/abc"] {
        assert_eq!(client.get(p).await.unwrap().status(), 200);
        assert_eq!(client.post(p, None).await.unwrap().status(), 200);
        assert_eq!(client.put(p, None).await.unwrap().status(), 200);
        assert_eq!(client.patch(p, None).await.unwrap().status(), 200);
        assert_eq!(client.delete(p, None).await.unwrap().status(), 200);
    }

    for request in server.received_requests().await.unwrap() {
        assert!(request.body.is_empty());
        assert!(request.headers.get("content-type").is_none());
    }
}

#[tokio::test]
async fn test_non_success_is_returned_not_raised() {
    let (server, client) = dispatcher().await;

    Mock::given(method("GET"))
        .and(path("/v3/user/profile"))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "errors": [{"field": null, "message": "access forbidden"}]
        })))
        .mount(&server)
        .await;

    let response = client.get("user/profile").await.unwrap();
    assert_eq!(response.status(), 403);

    let err = response.ensure_success().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Authorization(ref m) if m == "access forbidden"));
}

#[tokio::test]
async fn test_rate_limit_surfaces_retry_after() {
    let (server, client) = dispatcher().await;

    Mock::given(method("GET"))
        .and(path("/v3/stats"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("Retry-After", "7")
                .set_body_json(serde_json::json!({"errors": [{"message": "too many requests"}]})),
        )
        .mount(&server)
        .await;

    let err = client
        .send_json::<serde_json::Value>(ApiRequest::get("stats"))
        .await
        .unwrap_err();
    assert!(err.is_rate_limited());
    assert_eq!(err.retry_after(), Some(Duration::from_secs(7)));
}

// ============================================================================
// Failure synthesis
// ============================================================================

#[tokio::test]
async fn test_unreachable_host_becomes_400() {
    init_tracing();
    let config = ClientConfig::builder()
        .with_base_url("http://127.0.0.1:1")
        .with_connect_timeout(Duration::from_secs(2))
        .build();
    let client = GridClient::with_config(API_KEY, config).unwrap();

    let response = client
        .put("x", Some(&serde_json::json!({"a": 1})))
        .await
        .expect("transport failures are responses");
    assert_eq!(response.status(), 400);
    let body = response.text().unwrap();
    assert!(body.contains("Error"), "{body}");
    assert!(body.to_lowercase().contains("refused"), "{body}");
}

#[tokio::test]
async fn test_head_is_answered_with_405() {
    let (server, client) = dispatcher().await;

    let response = client
        .send(ApiRequest::new(RequestMethod::Head, "user/profile"))
        .await
        .unwrap();
    assert_eq!(response.status(), 405);

    let body: serde_json::Value = response.json().unwrap();
    assert_eq!(
        body,
        serde_json::json!({"errors": [{"field": null, "message": "HTTP method HEAD is not supported"}]})
    );
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ============================================================================
// Lifecycle and cancellation
// ============================================================================

#[tokio::test]
async fn test_close_then_send() {
    let (server, client) = dispatcher().await;

    client.close();
    client.close();
    assert!(client.is_closed());

    let response = client.get("user/profile").await.unwrap();
    assert_eq!(response.status(), 400);
    assert!(response.text().unwrap().starts_with("TransportClosed"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_cancel_in_flight() {
    let (server, client) = dispatcher().await;

    Mock::given(method("GET"))
        .and(path("/v3/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(10)))
        .mount(&server)
        .await;

    let token = CancellationToken::new();
    let cancellable = client.with_cancellation(token.clone());
    let call = tokio::spawn(async move { cancellable.get("slow").await });

    tokio::time::sleep(Duration::from_millis(100)).await;
    token.cancel();

    let err = tokio::time::timeout(Duration::from_secs(5), call)
        .await
        .expect("cancellation should be prompt")
        .unwrap()
        .unwrap_err();
    assert!(err.is_cancelled());

    // The handle it was derived from carries no token.
    assert!(client.cancellation_token().is_none());
}
