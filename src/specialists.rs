//! Specialist agents exposed to the orchestrator as tools
//!
//! A specialist is a descriptor (name, description, `{query}` schema) paired with
//! a handler that builds a fresh single-tool [`Agent`] per call and returns its
//! answer. The orchestrator sees it as any other [`Tool`].

use crate::agent::Agent;
use crate::error::{Error, Result};
use crate::provider::ModelProvider;
use crate::tools::{current_time_tool, weather_tool, JsonSchema, Tool, ToolContext, ToolOutput};
use async_trait::async_trait;
use schemars::JsonSchema as DeriveSchema;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

/// Name of the time specialist
pub const TIME_AGENT: &str = "time_agent";

/// Name of the weather specialist
pub const WEATHER_AGENT: &str = "weather_agent";

const TIME_PROMPT: &str =
    "You are a time specialist. Answer questions about the current date and time concisely.";
const TIME_DESCRIPTION: &str = "A specialist agent that answers questions about the current date and time. \
     Delegate any time-related questions to this agent.";

const WEATHER_PROMPT: &str =
    "You are a weather specialist. Answer questions about weather conditions concisely.";
const WEATHER_DESCRIPTION: &str = "A specialist agent that answers questions about weather conditions for any location. \
     Delegate any weather-related questions to this agent.";

/// Input every specialist accepts
#[derive(Debug, Deserialize, DeriveSchema)]
pub struct SpecialistInput {
    /// The question to answer, phrased for the specialist
    pub query: String,
}

/// A narrowly scoped agent wrapping exactly one tool
pub struct SpecialistTool {
    name: &'static str,
    description: &'static str,
    system_prompt: &'static str,
    bound_tool: fn() -> Arc<dyn Tool>,
    provider: Arc<dyn ModelProvider>,
}

impl SpecialistTool {
    /// Time specialist bound to `get_current_time`
    pub fn time(provider: Arc<dyn ModelProvider>) -> Self {
        Self {
            name: TIME_AGENT,
            description: TIME_DESCRIPTION,
            system_prompt: TIME_PROMPT,
            bound_tool: current_time_tool,
            provider,
        }
    }

    /// Weather specialist bound to `get_weather`
    pub fn weather(provider: Arc<dyn ModelProvider>) -> Self {
        Self {
            name: WEATHER_AGENT,
            description: WEATHER_DESCRIPTION,
            system_prompt: WEATHER_PROMPT,
            bound_tool: weather_tool,
            provider,
        }
    }

    /// Role prompt of this specialist
    pub fn system_prompt(&self) -> &str {
        self.system_prompt
    }

    /// Build the agent that answers one query
    pub fn agent(&self) -> Result<Agent> {
        Agent::builder()
            .name(self.name)
            .system_prompt(self.system_prompt)
            .model(self.provider.model()?)
            .tool((self.bound_tool)())
            .max_loops(self.provider.max_loops())
            .build()
    }

    /// Answer `query` with a freshly built agent
    pub async fn ask(&self, query: &str) -> Result<String> {
        let agent = self.agent()?;
        let output = agent.run(query).await?;
        tracing::debug!(
            specialist = self.name,
            iterations = output.trace.iteration_count(),
            "specialist answered"
        );
        Ok(output.content)
    }
}

#[async_trait]
impl Tool for SpecialistTool {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::of::<SpecialistInput>()
    }

    async fn execute(&self, params: Value, _ctx: &ToolContext) -> Result<ToolOutput> {
        let input: SpecialistInput = serde_json::from_value(params)
            .map_err(|e| Error::tool_execution(self.name, e.to_string()))?;

        Ok(ToolOutput::success(self.ask(&input.query).await?))
    }
}

/// Both specialists as orchestrator tools
pub fn specialist_tools(provider: Arc<dyn ModelProvider>) -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(SpecialistTool::time(provider.clone())),
        Arc::new(SpecialistTool::weather(provider)),
    ]
}

/// Ask the time specialist directly
pub async fn time_agent(provider: Arc<dyn ModelProvider>, query: &str) -> Result<String> {
    SpecialistTool::time(provider).ask(query).await
}

/// Ask the weather specialist directly
pub async fn weather_agent(provider: Arc<dyn ModelProvider>, query: &str) -> Result<String> {
    SpecialistTool::weather(provider).ask(query).await
}
