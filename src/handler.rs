//! Serverless-style request handler
//!
//! `{"body": "{\"query\": ...}"}` in, `{"statusCode": .., "body": ..}` out. The
//! handler is the only place errors are caught; every failure after the event is
//! read becomes a 500 carrying the error's text.

use crate::error::{Error, Result};
use crate::orchestrator::orchestrate;
use crate::provider::{EnvModelProvider, ModelProvider};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

/// Body of the 400 reply
pub const MISSING_QUERY: &str = "missing 'query' field";

/// Inbound HTTP-style event; fields other than `body` are ignored
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// JSON-encoded request body
    #[serde(default)]
    pub body: Option<String>,
}

impl Event {
    /// Event carrying `body`
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
        }
    }
}

/// Outbound status code and JSON body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// HTTP status code
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    /// JSON-encoded body
    pub body: String,
}

impl Response {
    /// 200 with `{"answer": ..}`
    pub fn answer(answer: impl Into<String>) -> Self {
        Self {
            status_code: 200,
            body: json!({ "answer": answer.into() }).to_string(),
        }
    }

    /// `status` with `{"error": ..}`
    pub fn error(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            body: json!({ "error": message.into() }).to_string(),
        }
    }

    /// Decoded body
    pub fn json(&self) -> Result<Value> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Request handler wrapping the orchestrator
#[derive(Clone)]
pub struct Handler {
    provider: Arc<dyn ModelProvider>,
}

impl Handler {
    /// Handler building agents from `provider`
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self { provider }
    }

    /// Handler backed by the process-wide settings
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(Arc::new(EnvModelProvider::from_global()?)))
    }

    /// Handle one event
    pub async fn handle(&self, event: Event) -> Response {
        match self.try_handle(event).await {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(error = %err, "request failed");
                Response::error(500, err.to_string())
            }
        }
    }

    /// Handle a raw event document and return the raw response document
    pub async fn handle_json(&self, raw_event: &str) -> Result<String> {
        let response = match serde_json::from_str::<Event>(raw_event) {
            Ok(event) => self.handle(event).await,
            Err(err) => {
                tracing::error!(error = %err, "unreadable event");
                Response::error(500, err.to_string())
            }
        };
        Ok(serde_json::to_string(&response)?)
    }

    async fn try_handle(&self, event: Event) -> Result<Response> {
        let raw = event
            .body
            .as_deref()
            .filter(|body| !body.is_empty())
            .unwrap_or("{}");
        let body: Value = serde_json::from_str(raw)?;

        let Some(query) = extract_query(&body)? else {
            tracing::warn!("rejected request without query");
            return Ok(Response::error(400, MISSING_QUERY));
        };

        tracing::info!(query_len = query.len(), "dispatching query");
        let answer = orchestrate(self.provider.clone(), &query).await?;
        tracing::info!(status = 200, "request answered");
        Ok(Response::answer(answer))
    }
}

/// The `query` field when present and truthy
///
/// `null`, `false`, zero, `""`, `[]` and `{}` count as missing. Any other
/// non-string value is an [`Error::InvalidInput`].
fn extract_query(body: &Value) -> Result<Option<String>> {
    let object = body
        .as_object()
        .ok_or_else(|| Error::InvalidInput("request body must be a JSON object".to_string()))?;

    let query = match object.get("query") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => None,
        Some(Value::Array(items)) if items.is_empty() => None,
        Some(Value::Object(fields)) if fields.is_empty() => None,
        Some(other) => {
            return Err(Error::InvalidInput(format!("'query' must be a string, got {}", other)));
        }
    };
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query_of(body: Value) -> Option<String> {
        extract_query(&body).unwrap()
    }

    #[test]
    fn test_falsy_queries_are_missing() {
        for body in [
            json!({}),
            json!({"query": null}),
            json!({"query": ""}),
            json!({"query": false}),
            json!({"query": 0}),
            json!({"query": []}),
            json!({"query": {}}),
        ] {
            assert_eq!(query_of(body.clone()), None, "{}", body);
        }
    }

    #[test]
    fn test_truthy_queries_pass_through() {
        assert_eq!(query_of(json!({"query": "What time is it?"})).as_deref(), Some("What time is it?"));
        assert_eq!(query_of(json!({"query": " "})).as_deref(), Some(" "));
    }

    #[test]
    fn test_truthy_non_string_query_is_invalid() {
        for body in [json!({"query": 42}), json!({"query": true}), json!({"query": ["a"]})] {
            let err = extract_query(&body).unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)), "{}", body);
        }
    }

    #[test]
    fn test_non_object_body_is_an_error() {
        assert!(extract_query(&json!(["query"])).is_err());
        assert!(extract_query(&json!("query")).is_err());
    }

    #[test]
    fn test_response_shapes() {
        let ok = serde_json::to_value(Response::answer("hi")).unwrap();
        assert_eq!(ok, json!({"statusCode": 200, "body": "{\"answer\":\"hi\"}"}));

        let bad = Response::error(400, MISSING_QUERY);
        assert_eq!(bad.json().unwrap(), json!({"error": "missing 'query' field"}));
    }
}
