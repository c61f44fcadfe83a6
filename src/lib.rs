//! # agent-relay
//!
//! An orchestrator agent that delegates user questions to two specialist agents,
//! one for the current time and one for (mock) weather, behind a serverless-style
//! request handler.
//!
//! All routing is decided by the hosted model: the orchestrator sees the
//! specialists as tools, each specialist sees exactly one tool function.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use agent_relay::{Event, Handler};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Reads MODEL_ID / LLM_PROVIDER; OPENROUTER_API_KEY is read by the client
//!     let handler = Handler::from_env()?;
//!
//!     let response = handler
//!         .handle(Event::new(r#"{"query": "What time is it, and is it raining in Oslo?"}"#))
//!         .await;
//!     println!("{} {}", response.status_code, response.body);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod agent;
pub mod config;
pub mod error;
pub mod handler;
pub mod llm_client;
pub mod openrouter;
pub mod orchestrator;
pub mod provider;
pub mod react;
pub mod server;
pub mod specialists;
pub mod telemetry;
pub mod tools;
pub mod types;
pub mod vllm;

// Re-exports for convenience
pub use agent::{Agent, AgentBuilder, AgentOutput};
pub use config::{ModelConfig, OpenRouterConfig, ProviderKind, Settings};
pub use error::{Error, Result};
pub use handler::{Event, Handler, Response, MISSING_QUERY};
pub use llm_client::LlmClient;
pub use openrouter::{CompletionRequest, CompletionResponse, Message, OpenRouterClient};
pub use orchestrator::{create_orchestrator, orchestrate};
pub use provider::{get_model, EnvModelProvider, Model, ModelProvider, StaticModelProvider};
pub use react::ReActTrace;
pub use specialists::{time_agent, weather_agent, SpecialistTool};
pub use tools::{current_time, get_weather, Tool, ToolContext, ToolOutput};
pub use types::{AgentId, TokenUsage};
pub use vllm::VllmClient;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::agent::{Agent, AgentBuilder, AgentOutput};
    pub use crate::error::{Error, Result};
    pub use crate::handler::{Event, Handler, Response};
    pub use crate::llm_client::LlmClient;
    pub use crate::provider::{Model, ModelProvider};
    pub use crate::tools::Tool;
    pub use crate::types::*;
}
