//! Unified LLM client trait for both remote (OpenRouter) and local (vLLM) models

use crate::error::Result;
use crate::openrouter::{CompletionRequest, CompletionResponse};
use async_trait::async_trait;

/// Unified trait for LLM clients (both remote and local)
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a completion request
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Get the client type for debugging/logging
    fn client_type(&self) -> &str;

    /// Get the base URL (for local models) or endpoint (for remote)
    fn endpoint(&self) -> &str;
}
