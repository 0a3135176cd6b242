use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};
use zephyr_notify::{router, EmailProvider, NotifyError, NotifyState, OutboundEmail};

#[derive(Clone, Default)]
struct RecordingProvider {
    sent: Arc<Mutex<Vec<OutboundEmail>>>,
    fail: bool,
}

#[async_trait]
impl EmailProvider for RecordingProvider {
    async fn send(&self, email: &OutboundEmail) -> zephyr_notify::Result<()> {
        self.sent.lock().expect("lock").push(email.clone());
        if self.fail {
            return Err(NotifyError::Provider {
                status: 401,
                body: "bad api key".to_string(),
            });
        }
        Ok(())
    }
}

/// Serves the router on a loopback port and returns its base address.
async fn spawn_app(provider: RecordingProvider) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, router(NotifyState::new(provider)))
            .await
            .expect("serve");
    });
    format!("http://{addr}")
}

async fn post_notify(provider: RecordingProvider, body: &str) -> (StatusCode, Value) {
    let base = spawn_app(provider).await;
    let response = reqwest::Client::new()
        .post(format!("{base}/api/notify"))
        .header("content-type", "application/json")
        .body(body.to_string())
        .send()
        .await
        .expect("response");
    let status = response.status();
    let value = response.json().await.expect("json body");
    (status, value)
}

#[tokio::test]
async fn notify_sends_welcome_email() {
    let provider = RecordingProvider::default();
    let body = json!({
        "email": "coach@example.com",
        "firstName": "Jimmy",
        "school": "Westlake High",
    })
    .to_string();

    let (status, value) = post_notify(provider.clone(), &body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value, json!({ "success": true }));
    let sent = provider.sent.lock().expect("lock");
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "coach@example.com");
    assert_eq!(sent[0].subject, "Welcome to Zephyr!");
    assert_eq!(sent[0].from.email, "prakul@zephyrtechnology.net");
    assert!(sent[0].text.contains("Hi Jimmy"));
    assert!(sent[0].tracking.click_tracking && sent[0].tracking.open_tracking);
}

#[tokio::test]
async fn notify_accepts_missing_school() {
    let provider = RecordingProvider::default();
    let body = json!({ "email": "coach@example.com", "firstName": "Fred" }).to_string();

    let (status, _) = post_notify(provider.clone(), &body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(provider.sent.lock().expect("lock").len(), 1);
}

#[tokio::test]
async fn provider_failure_returns_generic_500() {
    let provider = RecordingProvider {
        fail: true,
        ..Default::default()
    };
    let body = json!({ "email": "coach@example.com", "firstName": "Jimmy" }).to_string();

    let (status, value) = post_notify(provider, &body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(value, json!({ "error": "Failed to send email notification" }));
}

#[tokio::test]
async fn malformed_body_returns_500_without_sending() {
    let provider = RecordingProvider::default();

    let (status, value) = post_notify(provider.clone(), "{not json").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(value["error"], "Failed to send email notification");

    let (status, _) = post_notify(provider.clone(), r#"{"firstName":"Jimmy"}"#).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    assert!(provider.sent.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn unparseable_recipient_returns_500_without_sending() {
    let provider = RecordingProvider::default();
    let body = json!({ "email": "not an address", "firstName": "Jimmy" }).to_string();

    let (status, _) = post_notify(provider.clone(), &body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(provider.sent.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn other_methods_are_not_routed() {
    let base = spawn_app(RecordingProvider::default()).await;
    let response = reqwest::get(format!("{base}/api/notify"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
