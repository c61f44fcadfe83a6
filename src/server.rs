//! HTTP front for the handler, for running outside a serverless host

use crate::handler::{Event, Handler};
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, Response as HttpResponse, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use std::time::Duration;
use tower_http::trace::TraceLayer;

/// Default bind address for `RELAY_ADDR`
pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";

/// Routes: `POST /invoke`, `POST /event`, `GET /health`
pub fn router(handler: Handler) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!("request", method = %req.method(), uri = %req.uri())
        })
        .on_response(|res: &HttpResponse<Body>, latency: Duration, _span: &tracing::Span| {
            tracing::info!(
                latency_ms = latency.as_millis() as u64,
                status = res.status().as_u16(),
                "finished processing request"
            );
        });

    Router::new()
        .route("/invoke", post(invoke))
        .route("/event", post(event))
        .layer(trace_layer)
        .route("/health", get(health))
        .with_state(handler)
}

/// Raw request body becomes the event body
async fn invoke(State(handler): State<Handler>, body: String) -> Response {
    let response = handler.handle(Event::new(body)).await;
    let status = StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    json_reply(status, response.body)
}

/// Full event document in, full response document out
async fn event(State(handler): State<Handler>, body: String) -> Response {
    match handler.handle_json(&body).await {
        Ok(document) => json_reply(StatusCode::OK, document),
        Err(err) => json_reply(
            StatusCode::INTERNAL_SERVER_ERROR,
            serde_json::json!({ "error": err.to_string() }).to_string(),
        ),
    }
}

async fn health() -> &'static str {
    "ok"
}

fn json_reply(status: StatusCode, body: String) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}
