//! vLLM local model client with OpenAI-compatible API support
//!
//! Selected with `LLM_PROVIDER=vllm`. The server must be started with tool
//! calling enabled, for example:
//!
//! ```bash
//! python -m vllm.entrypoints.openai.api_server \
//!     --model Qwen/Qwen2.5-7B-Instruct \
//!     --enable-auto-tool-choice --tool-call-parser hermes \
//!     --port 8000
//! ```

use crate::error::{Error, Result};
use crate::llm_client::LlmClient;
use crate::openrouter::{CompletionRequest, CompletionResponse};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Default vLLM endpoint
pub const VLLM_BASE_URL: &str = "http://localhost:8000";

/// vLLM client configuration
#[derive(Debug, Clone)]
pub struct VllmConfig {
    /// Base URL of the vLLM server (e.g., "http://localhost:8000")
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Optional API key (for secured vLLM deployments)
    pub api_key: Option<String>,
}

impl VllmConfig {
    /// Create a new vLLM configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(300), // local reasoning can be slow
            api_key: None,
        }
    }

    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("VLLM_BASE_URL").unwrap_or_else(|_| VLLM_BASE_URL.to_string());
        let mut config = Self::new(base_url);
        config.api_key = std::env::var("VLLM_API_KEY").ok();
        Ok(config)
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

/// vLLM client for local model inference
pub struct VllmClient {
    /// HTTP client
    client: Client,
    /// Configuration
    config: VllmConfig,
}

impl VllmClient {
    /// Create a new vLLM client with the given configuration
    pub fn new(config: VllmConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { client, config })
    }

    /// Get the configuration
    pub fn config(&self) -> &VllmConfig {
        &self.config
    }
}

#[async_trait]
impl LlmClient for VllmClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let url = format!("{}/v1/chat/completions", self.config.base_url);

        let mut http_request = self.client.post(&url).json(&request);

        if let Some(ref api_key) = self.config.api_key {
            http_request = http_request.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = http_request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::provider(format!(
                "vLLM request failed with status {}: {}",
                status, error_text
            )));
        }

        let completion: CompletionResponse = response.json().await?;
        Ok(completion)
    }

    fn client_type(&self) -> &str {
        "vllm"
    }

    fn endpoint(&self) -> &str {
        &self.config.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openrouter::Message;

    #[test]
    fn test_vllm_config_builder() {
        let config = VllmConfig::new("http://localhost:9000/")
            .with_timeout(Duration::from_secs(60))
            .with_api_key("test-key");

        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.api_key, Some("test-key".to_string()));
    }

    #[tokio::test]
    async fn test_vllm_complete_posts_to_v1_path() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"choices":[{"message":{"role":"assistant","content":"hello"},"finish_reason":"stop"}]}"#,
            )
            .create_async()
            .await;

        let client = VllmClient::new(VllmConfig::new(server.url())).unwrap();
        let response = client
            .complete(CompletionRequest::new("local", vec![Message::user("hi")]))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.choices[0].message.content, "hello");
        assert_eq!(client.client_type(), "vllm");
    }
}
