use super::*;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode as HttpStatus},
    routing::post,
    Json, Router,
};
use serde_json::json;
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone, Default)]
struct ProviderState {
    seen: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

async fn accept(
    State(state): State<ProviderState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    let auth = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    state.seen.lock().await.push((auth, body));
    Json(json!({ "id": "email-123" }))
}

async fn reject() -> (HttpStatus, Json<Value>) {
    (
        HttpStatus::UNPROCESSABLE_ENTITY,
        Json(json!({ "statusCode": 422, "name": "validation_error", "message": "Invalid `to` field" })),
    )
}

async fn spawn_provider(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{addr}")
}

fn message() -> EmailMessage {
    EmailMessage {
        from: "no-reply@resend.dev".into(),
        to: "owner@example.com".into(),
        subject: "New message from your portfolio".into(),
        text: "Name: Jane\nEmail: jane@x.com\nMessage: Hello there!!".into(),
    }
}

#[test]
fn delivery_id_prefers_id_field() {
    let raw = json!({ "id": "a", "messageId": "b" });
    assert_eq!(extract_delivery_id(&raw), Some("a".to_string()));
}

#[test]
fn delivery_id_falls_back_to_message_id() {
    let raw = json!({ "id": 42, "messageId": "b" });
    assert_eq!(extract_delivery_id(&raw), Some("b".to_string()));
}

#[test]
fn delivery_id_tolerates_unexpected_shapes() {
    assert_eq!(extract_delivery_id(&Value::Null), None);
    assert_eq!(extract_delivery_id(&json!("id")), None);
    assert_eq!(extract_delivery_id(&json!(["id"])), None);
    assert_eq!(extract_delivery_id(&json!({ "data": { "id": "nested" } })), None);
}

#[tokio::test]
async fn resend_mailer_posts_message_with_bearer_credential() {
    let state = ProviderState::default();
    let app = Router::new()
        .route("/emails", post(accept))
        .with_state(state.clone());
    let base_url = spawn_provider(app).await;

    let mailer = ResendMailer::with_base_url("re_test_key", format!("{base_url}/"));
    let receipt = mailer.send(&message()).await.expect("delivered");
    assert_eq!(receipt.id.as_deref(), Some("email-123"));

    let seen = state.seen.lock().await;
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0.as_deref(), Some("Bearer re_test_key"));
    assert_eq!(seen[0].1["to"], "owner@example.com");
    assert_eq!(seen[0].1["subject"], "New message from your portfolio");
}

#[tokio::test]
async fn resend_mailer_surfaces_provider_message() {
    let app = Router::new().route("/emails", post(reject));
    let base_url = spawn_provider(app).await;

    let err = ResendMailer::with_base_url("re_test_key", base_url)
        .send(&message())
        .await
        .expect_err("rejected");
    match err {
        MailError::Provider { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message, "Invalid `to` field");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn resend_mailer_reports_unreachable_provider() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let err = ResendMailer::with_base_url("re_test_key", format!("http://{addr}"))
        .send(&message())
        .await
        .expect_err("unreachable");
    assert!(matches!(err, MailError::Transport(_)));
}
