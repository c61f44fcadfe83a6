mod common;

use agent_relay::{Event, Handler, MISSING_QUERY};
use common::{Counting, Failing, RouteToTime};
use serde_json::{json, Value};
use std::sync::atomic::Ordering;
use std::sync::Arc;

fn body_of(response: &agent_relay::Response) -> Value {
    serde_json::from_str(&response.body).unwrap()
}

#[tokio::test]
async fn time_query_is_answered_through_time_agent() {
    let client = Arc::new(RouteToTime::default());
    let provider = Counting::new(client.clone());
    let handler = Handler::new(provider.clone());

    let response = handler
        .handle(Event::new(r#"{"query": "What time is it?"}"#))
        .await;

    assert_eq!(response.status_code, 200);
    let answer = body_of(&response)["answer"].as_str().unwrap().to_string();
    assert!(answer.contains("UTC"), "{}", answer);

    // orchestrator + time specialist
    assert_eq!(provider.handles(), 2);
    assert_eq!(client.calls.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn missing_query_is_rejected_without_model_calls() {
    let client = Arc::new(RouteToTime::default());
    let provider = Counting::new(client.clone());
    let handler = Handler::new(provider.clone());

    let events = [
        Event::default(),
        Event::new(""),
        Event::new("{}"),
        Event::new(r#"{"query": ""}"#),
        Event::new(r#"{"query": null}"#),
        Event::new(r#"{"other": "What time is it?"}"#),
    ];

    for event in events {
        let response = handler.handle(event.clone()).await;
        assert_eq!(response.status_code, 400, "{:?}", event);
        assert_eq!(body_of(&response), json!({ "error": MISSING_QUERY }));
    }

    assert_eq!(provider.handles(), 0);
    assert_eq!(client.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn model_failure_becomes_500_with_its_message() {
    let handler = Handler::new(Counting::new(Arc::new(Failing("model unavailable"))));

    let response = handler
        .handle(Event::new(r#"{"query": "Weather in Paris?"}"#))
        .await;

    assert_eq!(response.status_code, 500);
    assert_eq!(body_of(&response), json!({ "error": "model unavailable" }));
}

#[tokio::test]
async fn malformed_body_takes_the_generic_error_path() {
    let client = Arc::new(RouteToTime::default());
    let provider = Counting::new(client.clone());
    let handler = Handler::new(provider.clone());

    for raw in ["{not json", r#"["query"]"#] {
        let response = handler.handle(Event::new(raw)).await;
        assert_eq!(response.status_code, 500, "{}", raw);
        assert!(body_of(&response)["error"].is_string());
    }
    assert_eq!(provider.handles(), 0);
}

#[tokio::test]
async fn valid_queries_yield_answer_or_error() {
    let ok = Handler::new(Counting::new(Arc::new(RouteToTime::default())));
    let failing = Handler::new(Counting::new(Arc::new(Failing("boom"))));

    for query in ["a", "What time is it?", "é", "weather?\n\"quoted\"", "{}"] {
        let raw = json!({ "query": query }).to_string();
        for handler in [&ok, &failing] {
            let response = handler.handle(Event::new(raw.clone())).await;
            let body = body_of(&response);
            match response.status_code {
                200 => assert!(body["answer"].is_string()),
                500 => assert!(body["error"].is_string()),
                other => panic!("unexpected status {}", other),
            }
        }
    }
}

#[tokio::test]
async fn raw_event_documents_round_trip() {
    let handler = Handler::new(Counting::new(Arc::new(RouteToTime::default())));

    let event = json!({ "body": r#"{"query": "What time is it?"}"#, "httpMethod": "POST" });
    let document: Value =
        serde_json::from_str(&handler.handle_json(&event.to_string()).await.unwrap()).unwrap();
    assert_eq!(document["statusCode"], 200);
    let body: Value = serde_json::from_str(document["body"].as_str().unwrap()).unwrap();
    assert!(body["answer"].as_str().unwrap().contains("UTC"));

    let document: Value =
        serde_json::from_str(&handler.handle_json(r#"{"body": null}"#).await.unwrap()).unwrap();
    assert_eq!(document["statusCode"], 400);

    let document: Value =
        serde_json::from_str(&handler.handle_json("not an event").await.unwrap()).unwrap();
    assert_eq!(document["statusCode"], 500);
}

#[tokio::test]
async fn non_string_query_is_a_500_without_model_calls() {
    let client = Arc::new(RouteToTime::default());
    let provider = Counting::new(client.clone());
    let handler = Handler::new(provider.clone());

    for raw in [r#"{"query": 42}"#, r#"{"query": true}"#, r#"{"query": ["time?"]}"#] {
        let response = handler.handle(Event::new(raw)).await;
        assert_eq!(response.status_code, 500, "{}", raw);
        let error = body_of(&response)["error"].as_str().unwrap().to_string();
        assert!(error.contains("'query' must be a string"), "{}", error);
    }

    assert_eq!(provider.handles(), 0);
    assert_eq!(client.calls.load(Ordering::SeqCst), 0);
}
