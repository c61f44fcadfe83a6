#![allow(dead_code)]

use agent_relay::config::ModelConfig;
use agent_relay::openrouter::{CompletionRequest, CompletionResponse, Message, Role, ToolCall};
use agent_relay::{Error, LlmClient, Model, ModelProvider, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Routes every question to `time_agent`, specialists call their tool, and every
/// agent echoes the last tool result as its answer.
#[derive(Default)]
pub struct RouteToTime {
    pub calls: AtomicUsize,
}

#[async_trait]
impl LlmClient for RouteToTime {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let last = request.messages.last().cloned().unwrap_or_else(|| Message::user(""));
        let tools = request.tools.unwrap_or_default();

        let reply = if last.role == Role::Tool || tools.is_empty() {
            Message::assistant(last.content)
        } else if tools.iter().any(|t| t.function.name == "time_agent") {
            let args = serde_json::json!({ "query": last.content }).to_string();
            Message::assistant_tool_calls("", vec![ToolCall::function("call_0", "time_agent", args)])
        } else {
            let name = tools[0].function.name.clone();
            Message::assistant_tool_calls("", vec![ToolCall::function("call_1", name, "{}")])
        };
        Ok(CompletionResponse::from_message("stub", reply))
    }

    fn client_type(&self) -> &str {
        "route-to-time"
    }

    fn endpoint(&self) -> &str {
        "memory://route-to-time"
    }
}

/// Fails every completion
pub struct Failing(pub &'static str);

#[async_trait]
impl LlmClient for Failing {
    async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse> {
        Err(Error::other(self.0))
    }

    fn client_type(&self) -> &str {
        "failing"
    }

    fn endpoint(&self) -> &str {
        "memory://failing"
    }
}

/// Provider counting how many model handles were requested
pub struct Counting {
    client: Arc<dyn LlmClient>,
    pub handles: AtomicUsize,
}

impl Counting {
    pub fn new(client: Arc<dyn LlmClient>) -> Arc<Self> {
        Arc::new(Self {
            client,
            handles: AtomicUsize::new(0),
        })
    }

    pub fn handles(&self) -> usize {
        self.handles.load(Ordering::SeqCst)
    }
}

impl ModelProvider for Counting {
    fn model(&self) -> Result<Model> {
        self.handles.fetch_add(1, Ordering::SeqCst);
        Ok(Model::new(self.client.clone(), ModelConfig::new("stub")))
    }
}
