//! Orchestrator agent delegating to the specialists
//!
//! Routing is left entirely to the model: the orchestrator only sees the two
//! specialists as tools and a prompt describing when to use each.

use crate::agent::Agent;
use crate::error::Result;
use crate::provider::ModelProvider;
use crate::specialists::specialist_tools;
use std::sync::Arc;

/// Name of the orchestrator agent
pub const ORCHESTRATOR: &str = "orchestrator";

/// System prompt of the orchestrator
pub const ORCHESTRATOR_PROMPT: &str = "You are an orchestrator that delegates to specialist agents. \
     Use 'time_agent' for date/time questions and 'weather_agent' for weather questions. \
     For queries that span multiple topics, call each relevant specialist. \
     Combine the specialist responses into a single concise answer.";

/// Build a fresh orchestrator with both specialists as tools
pub fn create_orchestrator(provider: Arc<dyn ModelProvider>) -> Result<Agent> {
    Agent::builder()
        .name(ORCHESTRATOR)
        .system_prompt(ORCHESTRATOR_PROMPT)
        .model(provider.model()?)
        .tools(specialist_tools(provider.clone()))
        .max_loops(provider.max_loops())
        .build()
}

/// Answer `query` through a freshly built orchestrator
pub async fn orchestrate(provider: Arc<dyn ModelProvider>, query: &str) -> Result<String> {
    let orchestrator = create_orchestrator(provider)?;
    let output = orchestrator.run(query).await?;
    tracing::info!(
        specialists = ?output.trace.tools_called(),
        tokens = output.trace.total_tokens.total_tokens,
        "orchestrator answered"
    );
    Ok(output.content)
}
