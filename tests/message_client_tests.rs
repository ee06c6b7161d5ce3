mod common;

use axum::http::StatusCode;
use chat_widget::error::ClientError;
use chat_widget::services::message_client::{FALLBACK_MESSAGE, Reply};
use common::{StubBackend, StubReply, unreachable_client};
use serde_json::json;

#[tokio::test]
async fn test_success_displays_response_text() {
    let backend = StubBackend::spawn(StubReply::Json(json!({ "response": "hello" }))).await;
    let client = backend.client();

    let reply = client.exchange("hi there").await;
    assert!(!reply.is_failed());
    assert_eq!(reply.text(), "hello");

    let requests = backend.requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0], json!({ "message": "hi there", "company_id": "acme" }));
}

#[tokio::test]
async fn test_extra_fields_are_kept() {
    let backend = StubBackend::spawn(StubReply::Json(json!({
        "response": "We open at 9.",
        "confidence": 0.75,
        "context": "We open at 9.",
        "source": "hours.txt"
    })))
    .await;

    let reply = backend.client().send("opening hours").await.unwrap();
    assert_eq!(reply.text, "We open at 9.");
    assert_eq!(reply.confidence, Some(0.75));
    assert_eq!(reply.source.as_deref(), Some("hours.txt"));
}

#[tokio::test]
async fn test_message_is_forwarded_unchanged() {
    let backend = StubBackend::spawn(StubReply::Json(json!({ "response": "ok" }))).await;
    let client = backend.client();

    let message = "  ünïcödé 🚀 \"quoted\" {json} \n second line ";
    client.exchange(message).await;

    let requests = backend.requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["message"], message);
}

#[tokio::test]
async fn test_missing_response_field_falls_back() {
    let backend = StubBackend::spawn(StubReply::Json(json!({ "answer": "hello" }))).await;
    let client = backend.client();

    assert!(matches!(
        client.send("hi").await,
        Err(ClientError::MissingResponse)
    ));

    let reply = client.exchange("hi").await;
    assert!(reply.is_failed());
    assert_eq!(reply.text(), FALLBACK_MESSAGE);
}

#[tokio::test]
async fn test_null_or_empty_response_falls_back() {
    for body in [json!({ "response": null }), json!({ "response": "" })] {
        let backend = StubBackend::spawn(StubReply::Json(body)).await;
        let reply = backend.client().exchange("hi").await;
        assert!(matches!(reply, Reply::Failed(ClientError::MissingResponse)));
        assert_eq!(reply.text(), FALLBACK_MESSAGE);
    }
}

#[tokio::test]
async fn test_non_json_body_falls_back() {
    let backend = StubBackend::spawn(StubReply::Text("<html>oops</html>")).await;

    let reply = backend.client().exchange("hi").await;
    assert!(matches!(reply, Reply::Failed(ClientError::Decode(_))));
    assert_eq!(reply.text(), FALLBACK_MESSAGE);

    // The serde_json error stays reachable through the source chain.
    let err = backend.client().send("hi").await.unwrap_err();
    let source = std::error::Error::source(&err).expect("decode error keeps its source");
    assert!(source.downcast_ref::<serde_json::Error>().is_some());
}

#[tokio::test]
async fn test_error_status_falls_back() {
    let backend = StubBackend::spawn(StubReply::Status(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "response": "not really", "detail": "boom" }),
    ))
    .await;

    let reply = backend.client().exchange("hi").await;
    match reply {
        Reply::Failed(ClientError::Status(status)) => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR)
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_network_failure_falls_back() {
    let client = unreachable_client().await;

    assert!(matches!(
        client.send("hi").await,
        Err(ClientError::Transport(_))
    ));

    let reply = client.exchange("hi").await;
    assert_eq!(reply.text(), FALLBACK_MESSAGE);
}

#[tokio::test]
async fn test_one_request_per_call() {
    let backend = StubBackend::spawn(StubReply::Json(json!({ "nope": true }))).await;
    let client = backend.client();

    client.exchange("first").await;
    client.exchange("second").await;

    // Failures are not retried.
    let requests = backend.requests().await;
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0]["message"], "first");
    assert_eq!(requests[1]["message"], "second");
}

#[tokio::test]
async fn test_timeout_from_custom_client_falls_back() {
    use chat_widget::config::WidgetConfig;
    use chat_widget::services::message_client::MessageClient;
    use std::time::Duration;

    let backend = StubBackend::spawn(StubReply::Echo).await;
    let http = reqwest::Client::builder()
        .timeout(Duration::from_millis(50))
        .build()
        .unwrap();
    let client = MessageClient::with_client(WidgetConfig::new(&backend.url(), "acme").unwrap(), http);

    let reply = client.exchange("slow answer please").await;
    assert!(matches!(reply, Reply::Failed(ClientError::Transport(_))));
    assert_eq!(reply.text(), FALLBACK_MESSAGE);
}
