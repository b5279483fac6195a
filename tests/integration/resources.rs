//! Resource facades end to end.

use super::common::mail_client;
use chrono::{NaiveDate, TimeZone, Utc};
use gridmail::resources::{AggregateBy, CampaignDraft, CampaignStatus, GroupUpdate};
use gridmail::{StatsQuery, SuppressionQuery};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

// ============================================================================
// Suppressions
// ============================================================================

#[tokio::test]
async fn test_bounce_cleanup_workflow() {
    let (server, client) = mail_client().await;

    Mock::given(method("GET"))
        .and(path("/v3/suppression/bounces"))
        .and(query_param("start_time", "1704067200"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"created": 1704100000, "email": "gone@example.com", "reason": "550 unknown user", "status": "5.1.1"},
            {"created": 1704200000, "email": "full@example.com", "reason": "452 mailbox full", "status": "4.2.2"}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v3/suppression/bounces"))
        .and(body_json(serde_json::json!({"emails": ["full@example.com"]})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let bounces = client.bounces();
    let query =
        SuppressionQuery::new().with_start(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    let soft: Vec<String> = bounces
        .list(query)
        .await
        .unwrap()
        .into_iter()
        .filter(|b| b.status.as_deref().is_some_and(|s| s.starts_with('4')))
        .map(|b| b.email)
        .collect();
    assert_eq!(soft, vec!["full@example.com"]);

    bounces.delete_many(&soft).await.unwrap();
}

#[tokio::test]
async fn test_unsubscribe_group_workflow() {
    let (server, client) = mail_client().await;

    Mock::given(method("POST"))
        .and(path("/v3/asm/groups"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 55, "name": "Digest", "description": "Weekly digest", "is_default": false
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/v3/asm/groups/55"))
        .and(body_json(serde_json::json!({"name": "Monthly Digest"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 55, "name": "Monthly Digest", "description": "Weekly digest", "is_default": false
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v3/asm/groups/55/suppressions"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "recipient_emails": ["reader@example.com"]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/asm/suppressions/global/reader%40example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let group = client
        .unsubscribe_groups()
        .create("Digest", "Weekly digest", false)
        .await
        .unwrap();
    let renamed = client
        .unsubscribe_groups()
        .update(group.id, &GroupUpdate::default().name("Monthly Digest"))
        .await
        .unwrap();
    assert_eq!(renamed.name, "Monthly Digest");

    client
        .suppressions()
        .add(group.id, &["reader@example.com".to_string()])
        .await
        .unwrap();
    assert!(!client
        .global_suppressions()
        .is_suppressed("reader@example.com")
        .await
        .unwrap());
}

// ============================================================================
// Statistics and campaigns
// ============================================================================

#[tokio::test]
async fn test_monthly_category_stats() {
    let (server, client) = mail_client().await;

    Mock::given(method("GET"))
        .and(path("/v3/categories/stats"))
        .and(query_param("aggregated_by", "month"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"date": "2024-01-01", "stats": [
                {"type": "category", "name": "promo", "metrics": {"delivered": 100, "unique_opens": 40}}
            ]}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let query = StatsQuery::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
        .with_end(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap())
        .aggregated_by(AggregateBy::Month);
    let stats = client
        .statistics()
        .categories(&["promo"], &query)
        .await
        .unwrap();
    assert_eq!(stats[0].stats[0].metrics.unique_open_rate(), Some(40.0));
}

#[tokio::test]
async fn test_campaign_draft_to_schedule() {
    let (server, client) = mail_client().await;
    let send_at = Utc.with_ymd_and_hms(2030, 3, 1, 9, 0, 0).unwrap();

    Mock::given(method("POST"))
        .and(path("/v3/campaigns"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 12, "title": "Launch", "status": "Draft"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v3/campaigns/12/schedules"))
        .and(body_json(serde_json::json!({"send_at": send_at.timestamp()})))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 12, "send_at": send_at.timestamp(), "status": "Scheduled"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let campaigns = client.campaigns();
    let campaign = campaigns
        .create(&CampaignDraft::new("Launch").html_content("<p>Hello</p>"))
        .await
        .unwrap();
    let schedule = campaigns.schedule(campaign.id, send_at).await.unwrap();
    assert_eq!(schedule.status, Some(CampaignStatus::Scheduled));
    assert_eq!(schedule.send_at, Some(send_at));
}

// ============================================================================
// Errors
// ============================================================================

#[tokio::test]
async fn test_bad_key_is_authentication_error() {
    let (server, client) = mail_client().await;

    Mock::given(method("GET"))
        .and(path("/v3/user/account"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "errors": [{"field": null, "message": "authorization required"}]
        })))
        .mount(&server)
        .await;

    let err = client.user().account().await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert!(err.client_error().unwrap().is_auth_error());
}
