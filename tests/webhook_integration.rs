//! Billing webhook

mod common;

use chirpy::store::Store;
use common::{spawn_app, POLKA_KEY};
use serde_json::{json, Value};

async fn post_webhook(app: &common::TestApp, api_key: Option<&str>, body: Value) -> reqwest::Response {
    let mut request = app.client.post(app.url("/api/polka/webhooks")).json(&body);
    if let Some(key) = api_key {
        request = request.header("Authorization", format!("ApiKey {}", key));
    }
    request.send().await.expect("Failed to execute request.")
}

#[tokio::test]
async fn upgrade_event_marks_user_as_chirpy_red() {
    let app = spawn_app().await;
    let user = app.signed_in_user("walt@breakingbad.com", "04234").await;

    let response = post_webhook(
        &app,
        Some(POLKA_KEY),
        json!({ "event": "user.upgraded", "data": { "user_id": user["id"] } }),
    )
    .await;
    assert_eq!(204, response.status().as_u16());

    let body: Value = app
        .post_login("walt@breakingbad.com", "04234")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body["is_chirpy_red"], true);
}

#[tokio::test]
async fn upgrade_event_for_unknown_user_returns_404() {
    let app = spawn_app().await;

    let response = post_webhook(
        &app,
        Some(POLKA_KEY),
        json!({ "event": "user.upgraded", "data": { "user_id": uuid::Uuid::new_v4() } }),
    )
    .await;

    assert_eq!(404, response.status().as_u16());
}

#[tokio::test]
async fn unrecognised_events_are_acknowledged_without_mutation() {
    let app = spawn_app().await;
    let user = app.signed_in_user("walt@breakingbad.com", "04234").await;

    let payloads = vec![
        json!({ "event": "user.payment_failed", "data": { "user_id": user["id"] } }),
        json!({ "event": "user.downgraded", "data": "not even an object" }),
        json!({ "event": "something.else" }),
        json!({ "event": "", "data": { "user_id": 42 } }),
    ];

    for payload in payloads {
        let response = post_webhook(&app, Some(POLKA_KEY), payload.clone()).await;
        assert_eq!(204, response.status().as_u16(), "payload: {}", payload);
    }

    let stored = app
        .store
        .find_user_by_email("walt@breakingbad.com")
        .await
        .unwrap()
        .unwrap();
    assert!(!stored.is_chirpy_red);
}

#[tokio::test]
async fn webhook_requires_api_key() {
    let app = spawn_app().await;
    let body = json!({ "event": "user.upgraded", "data": { "user_id": uuid::Uuid::new_v4() } });

    let response = post_webhook(&app, None, body.clone()).await;
    assert_eq!(401, response.status().as_u16());

    let response = post_webhook(&app, Some("wrong-key"), body.clone()).await;
    assert_eq!(401, response.status().as_u16());

    let prefix = &POLKA_KEY[..POLKA_KEY.len() - 1];
    let response = post_webhook(&app, Some(prefix), body.clone()).await;
    assert_eq!(401, response.status().as_u16());

    let response = app
        .client
        .post(app.url("/api/polka/webhooks"))
        .bearer_auth(POLKA_KEY)
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(401, response.status().as_u16());
}

#[tokio::test]
async fn upgrade_event_with_malformed_user_id_returns_400() {
    let app = spawn_app().await;

    let response = post_webhook(
        &app,
        Some(POLKA_KEY),
        json!({ "event": "user.upgraded", "data": { "user_id": "not-a-uuid" } }),
    )
    .await;

    assert_eq!(400, response.status().as_u16());
}
