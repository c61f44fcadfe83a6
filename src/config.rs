//! Configuration types for agent-relay
//!
//! [`Settings`] is resolved once per process from built-in defaults, an optional
//! `.env` file and the environment. Client credentials stay with the client
//! configs ([`OpenRouterConfig`], [`crate::vllm::VllmConfig`]).

use crate::error::{Error, Result};
use config::{Config, Environment};
use dotenvy::dotenv;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::time::Duration;
use url::Url;

/// Model identifier used when `MODEL_ID` is not set
pub const DEFAULT_MODEL_ID: &str = "anthropic/claude-sonnet-4";

/// Default OpenRouter API endpoint
pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

static SETTINGS: OnceLock<Settings> = OnceLock::new();

/// Model configuration for an agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model identifier (e.g., "anthropic/claude-sonnet-4")
    pub model: String,
    /// Temperature for sampling (0.0-2.0)
    pub temperature: Option<f32>,
    /// Maximum tokens for completion
    pub max_tokens: Option<u32>,
}

impl ModelConfig {
    /// Create a new model configuration
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            temperature: None,
            max_tokens: None,
        }
    }

    /// Set the temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the maximum tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Which wire client serves the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Hosted models through OpenRouter
    #[default]
    OpenRouter,
    /// Local OpenAI-compatible vLLM server
    Vllm,
}

/// Process-wide settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// `MODEL_ID`
    pub model_id: String,
    /// `LLM_PROVIDER`
    #[serde(default)]
    pub llm_provider: ProviderKind,
    /// `LLM_BASE_URL`
    #[serde(default)]
    pub llm_base_url: Option<String>,
    /// `MODEL_TEMPERATURE`
    #[serde(default)]
    pub model_temperature: Option<f32>,
    /// `MODEL_MAX_TOKENS`
    #[serde(default)]
    pub model_max_tokens: Option<u32>,
    /// `AGENT_MAX_LOOPS`
    pub agent_max_loops: u32,
    /// `LLM_TIMEOUT_SECS`
    pub llm_timeout_secs: u64,
}

impl Settings {
    /// Load settings from `.env` and the process environment
    pub fn load() -> Result<Self> {
        let _ = dotenv();
        Self::from_environment(Environment::default())
    }

    /// Load settings from an explicit key/value map instead of the process environment
    pub fn from_map(vars: config::Map<String, String>) -> Result<Self> {
        Self::from_environment(Environment::default().source(Some(vars)))
    }

    fn from_environment(env: Environment) -> Result<Self> {
        let settings = Config::builder()
            .set_default("model_id", DEFAULT_MODEL_ID)?
            .set_default("agent_max_loops", 10)?
            .set_default("llm_timeout_secs", 120)?
            .add_source(env)
            .build()?
            .try_deserialize::<Settings>()?;

        if settings.model_id.trim().is_empty() {
            return Err(Error::config("MODEL_ID must not be empty"));
        }
        if settings.agent_max_loops == 0 {
            return Err(Error::config("AGENT_MAX_LOOPS must be at least 1"));
        }

        Ok(settings)
    }

    /// Settings for this process, loaded from the environment on first use
    pub fn global() -> Result<&'static Settings> {
        if let Some(settings) = SETTINGS.get() {
            return Ok(settings);
        }
        let loaded = Self::load()?;
        Ok(SETTINGS.get_or_init(|| loaded))
    }

    /// Install explicit settings for this process; fails once settings are resolved
    pub fn install(settings: Settings) -> Result<()> {
        SETTINGS
            .set(settings)
            .map_err(|_| Error::config("settings already initialized"))
    }

    /// Override the model identifier
    pub fn with_model_id(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }

    /// Override the provider
    pub fn with_provider(mut self, provider: ProviderKind) -> Self {
        self.llm_provider = provider;
        self
    }

    /// Override the endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.llm_base_url = Some(base_url.into());
        self
    }

    /// Model configuration derived from these settings
    pub fn model_config(&self) -> ModelConfig {
        ModelConfig {
            model: self.model_id.clone(),
            temperature: self.model_temperature,
            max_tokens: self.model_max_tokens,
        }
    }

    /// HTTP timeout for model calls
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_MODEL_ID.to_string(),
            llm_provider: ProviderKind::default(),
            llm_base_url: None,
            model_temperature: None,
            model_max_tokens: None,
            agent_max_loops: 10,
            llm_timeout_secs: 120,
        }
    }
}

/// OpenRouter client configuration
#[derive(Clone)]
pub struct OpenRouterConfig {
    /// API key (loaded from environment variable)
    pub api_key: SecretString,
    /// Base URL for OpenRouter API
    pub base_url: Url,
    /// Request timeout
    pub timeout: Duration,
    /// App name for OpenRouter tracking
    pub app_name: String,
}

impl OpenRouterConfig {
    /// Create a new OpenRouter configuration from environment
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENROUTER_API_KEY")
            .map_err(|_| Error::config("OPENROUTER_API_KEY environment variable not set"))?;

        Self::new(api_key)
    }

    /// Create a new OpenRouter configuration with a specific API key
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            api_key: SecretString::from(api_key.into()),
            base_url: Url::parse(OPENROUTER_BASE_URL)?,
            timeout: Duration::from_secs(120),
            app_name: "agent-relay".to_string(),
        })
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the API key as a string
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Chat completions endpoint
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.as_str().trim_end_matches('/'))
    }
}

impl std::fmt::Debug for OpenRouterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenRouterConfig")
            .field("api_key", &"***REDACTED***")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("app_name", &self.app_name)
            .finish()
    }
}
