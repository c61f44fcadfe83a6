mod common;

use agent_relay::server::router;
use agent_relay::Handler;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use common::{Counting, RouteToTime};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> axum::Router {
    router(Handler::new(Counting::new(Arc::new(RouteToTime::default()))))
}

async fn send(method: &str, uri: &str, body: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn invoke_maps_handler_status() {
    let (status, body) = send("POST", "/invoke", r#"{"query": "What time is it?"}"#).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert!(body["answer"].as_str().unwrap().contains("UTC"));

    let (status, body) = send("POST", "/invoke", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"missing 'query' field"}"#);
}

#[tokio::test]
async fn event_returns_response_document() {
    let (status, body) = send("POST", "/event", r#"{"body": "{}"}"#).await;
    assert_eq!(status, StatusCode::OK);
    let document: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(document["statusCode"], 400);
}

#[tokio::test]
async fn health_is_ok() {
    let (status, body) = send("GET", "/health", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}
