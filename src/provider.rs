//! Model provider: resolves the model handle every agent is built on

use crate::config::{ModelConfig, OpenRouterConfig, ProviderKind, Settings};
use crate::error::Result;
use crate::llm_client::LlmClient;
use crate::openrouter::OpenRouterClient;
use crate::vllm::{VllmClient, VllmConfig};
use std::sync::Arc;
use url::Url;

/// Loop bound used when a provider does not say otherwise
pub const DEFAULT_MAX_LOOPS: u32 = 10;

/// Opaque handle to a hosted text-generation model
#[derive(Clone)]
pub struct Model {
    client: Arc<dyn LlmClient>,
    config: ModelConfig,
}

impl Model {
    /// Pair a client with the model configuration sent on every request
    pub fn new(client: Arc<dyn LlmClient>, config: ModelConfig) -> Self {
        Self { client, config }
    }

    /// Model configuration
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Model identifier
    pub fn id(&self) -> &str {
        &self.config.model
    }

    /// Underlying wire client
    pub fn client(&self) -> &Arc<dyn LlmClient> {
        &self.client
    }
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("client", &self.client.client_type())
            .field("endpoint", &self.client.endpoint())
            .field("config", &self.config)
            .finish()
    }
}

/// Source of model handles for agents
pub trait ModelProvider: Send + Sync {
    /// Produce a model handle for a new agent
    fn model(&self) -> Result<Model>;

    /// Maximum tool-calling iterations per agent run
    fn max_loops(&self) -> u32 {
        DEFAULT_MAX_LOOPS
    }
}

/// Provider backed by [`Settings`]; credentials come from the client's environment
#[derive(Debug, Clone)]
pub struct EnvModelProvider {
    settings: Settings,
}

impl EnvModelProvider {
    /// Create a provider from explicit settings
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Create a provider from the process-wide settings
    pub fn from_global() -> Result<Self> {
        Ok(Self::new(Settings::global()?.clone()))
    }

    /// Settings this provider builds clients from
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn client(&self) -> Result<Arc<dyn LlmClient>> {
        let settings = &self.settings;
        let client: Arc<dyn LlmClient> = match settings.llm_provider {
            ProviderKind::OpenRouter => {
                let mut config = OpenRouterConfig::from_env()?.with_timeout(settings.timeout());
                if let Some(base_url) = &settings.llm_base_url {
                    config = config.with_base_url(Url::parse(base_url)?);
                }
                Arc::new(OpenRouterClient::new(config)?)
            }
            ProviderKind::Vllm => {
                let mut config = VllmConfig::from_env()?;
                if let Some(base_url) = &settings.llm_base_url {
                    config = VllmConfig {
                        api_key: config.api_key,
                        ..VllmConfig::new(base_url.as_str())
                    };
                }
                Arc::new(VllmClient::new(config.with_timeout(settings.timeout()))?)
            }
        };
        Ok(client)
    }
}

impl ModelProvider for EnvModelProvider {
    fn model(&self) -> Result<Model> {
        let client = self.client()?;
        tracing::debug!(
            model = %self.settings.model_id,
            client = client.client_type(),
            "resolved model handle"
        );
        Ok(Model::new(client, self.settings.model_config()))
    }

    fn max_loops(&self) -> u32 {
        self.settings.agent_max_loops
    }
}

/// Provider that hands out one fixed model handle
#[derive(Clone)]
pub struct StaticModelProvider {
    model: Model,
    max_loops: u32,
}

impl StaticModelProvider {
    /// Wrap a model handle
    pub fn new(model: Model) -> Self {
        Self {
            model,
            max_loops: DEFAULT_MAX_LOOPS,
        }
    }

    /// Wrap a client under the given model identifier
    pub fn from_client(client: Arc<dyn LlmClient>, model_id: impl Into<String>) -> Self {
        Self::new(Model::new(client, ModelConfig::new(model_id)))
    }

    /// Set the loop bound
    pub fn with_max_loops(mut self, max_loops: u32) -> Self {
        self.max_loops = max_loops;
        self
    }
}

impl ModelProvider for StaticModelProvider {
    fn model(&self) -> Result<Model> {
        Ok(self.model.clone())
    }

    fn max_loops(&self) -> u32 {
        self.max_loops
    }
}

/// Model handle from the process-wide settings
pub fn get_model() -> Result<Model> {
    EnvModelProvider::from_global()?.model()
}
