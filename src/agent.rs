//! Agent implementation with a tool-calling loop

use crate::error::{Error, Result};
use crate::openrouter::{CompletionRequest, Message, ToolCall, ToolDefinition};
use crate::provider::{get_model, Model, DEFAULT_MAX_LOOPS};
use crate::react::{Action, Observation, ReActTrace, Thought};
use crate::tools::{Tool, ToolContext};
use crate::types::{AgentId, TokenUsage};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Agent structure
pub struct Agent {
    /// Unique identifier for this agent instance
    pub id: AgentId,
    /// Human-readable name for tracing and debugging
    pub name: String,
    /// System prompt defining agent persona and capabilities
    pub system_prompt: String,
    /// Maximum model round trips before giving up
    pub max_loops: u32,
    /// Model handle
    model: Model,
    /// Available tools this agent can invoke
    tools: Vec<Arc<dyn Tool>>,
}

impl Agent {
    /// Create a new agent builder
    pub fn builder() -> AgentBuilder {
        AgentBuilder::new()
    }

    /// Model handle this agent calls
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Tools bound to this agent
    pub fn tools(&self) -> &[Arc<dyn Tool>] {
        &self.tools
    }

    /// Run the loop and return only the final text
    pub async fn invoke(&self, input: &str) -> Result<String> {
        Ok(self.run(input).await?.content)
    }

    /// Run the tool-calling loop for the given input
    ///
    /// Each iteration sends the conversation and tool descriptors to the model.
    /// A reply with tool calls gets every call executed in order and its result
    /// appended as a `tool` message; a reply without tool calls is the answer.
    #[tracing::instrument(skip_all, fields(agent = %self.name, agent_id = %self.id))]
    pub async fn run(&self, input: &str) -> Result<AgentOutput> {
        let definitions = self
            .tools
            .iter()
            .map(|tool| tool.definition())
            .collect::<Result<Vec<ToolDefinition>>>()?;

        let mut trace = ReActTrace::new();
        let mut messages = vec![Message::system(&self.system_prompt), Message::user(input)];

        for iteration in 0..self.max_loops {
            tracing::debug!(iteration, messages = messages.len(), "calling model");

            let config = self.model.config();
            let request = CompletionRequest::new(&config.model, messages.clone())
                .with_temperature(config.temperature)
                .with_max_tokens(config.max_tokens)
                .with_tools(definitions.clone());

            let response = self.model.client().complete(request).await?;
            let tokens = response.usage.map(TokenUsage::from).unwrap_or_default();
            let reply = response
                .choices
                .into_iter()
                .next()
                .map(|choice| choice.message)
                .ok_or_else(|| Error::provider("completion contained no choices"))?;

            trace.add_thought(Thought::new(&reply.content).with_tokens(tokens));

            let calls = reply.requested_tool_calls().to_vec();
            if calls.is_empty() {
                trace.add_action(Action::final_answer(&reply.content));
                trace.complete();
                tracing::debug!(iterations = trace.iteration_count(), "agent finished");
                return Ok(AgentOutput::new(self.id, reply.content, trace));
            }

            messages.push(Message::assistant_tool_calls(reply.content, calls.clone()));
            for call in calls {
                let observation = self.execute_tool(&call, &mut trace).await?;
                messages.push(Message::tool(&observation.content, &call.id));
                trace.add_observation(observation);
            }
        }

        trace.complete();
        Err(Error::MaxLoopsExceeded(self.max_loops))
    }

    /// Execute one requested tool call; problems the model can correct are observations
    async fn execute_tool(&self, call: &ToolCall, trace: &mut ReActTrace) -> Result<Observation> {
        let name = call.function.name.as_str();

        let params = match parse_arguments(&call.function.arguments) {
            Ok(params) => params,
            Err(message) => {
                trace.add_action(Action::tool_call(name, &call.id, Value::Null));
                return Ok(Observation::error(format!(
                    "Error: arguments for '{}' are not valid JSON: {}",
                    name, message
                )));
            }
        };
        trace.add_action(Action::tool_call(name, &call.id, params.clone()));

        let Some(tool) = self.tools.iter().find(|t| t.name() == name) else {
            tracing::warn!(tool = name, "model requested unknown tool");
            return Ok(Observation::error(format!("Error: unknown tool '{}'", name)));
        };

        if let Err(err) = tool.validate(&params) {
            return Ok(Observation::error(format!("Error: {}", err)));
        }

        tracing::info!(tool = name, call_id = %call.id, "executing tool");
        let ctx = ToolContext::new(self.id).with_call_id(&call.id);
        let output = tool.execute(params, &ctx).await?;

        if output.success {
            Ok(Observation::new(output.content))
        } else {
            Ok(Observation::error(output.observation()))
        }
    }
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tools: Vec<&str> = self.tools.iter().map(|t| t.name()).collect();
        f.debug_struct("Agent")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("model", &self.model)
            .field("tools", &tools)
            .field("max_loops", &self.max_loops)
            .finish()
    }
}

fn parse_arguments(raw: &str) -> std::result::Result<Value, String> {
    if raw.trim().is_empty() {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_str(raw).map_err(|e| e.to_string())
}

/// Agent builder
pub struct AgentBuilder {
    name: Option<String>,
    system_prompt: Option<String>,
    model: Option<Model>,
    tools: Vec<Arc<dyn Tool>>,
    max_loops: u32,
}

impl AgentBuilder {
    /// Create a new agent builder
    pub fn new() -> Self {
        Self {
            name: None,
            system_prompt: None,
            model: None,
            tools: Vec::new(),
            max_loops: DEFAULT_MAX_LOOPS,
        }
    }

    /// Set the agent name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the system prompt
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Set the model handle
    pub fn model(mut self, model: Model) -> Self {
        self.model = Some(model);
        self
    }

    /// Add a tool
    pub fn tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    /// Add multiple tools
    pub fn tools(mut self, tools: Vec<Arc<dyn Tool>>) -> Self {
        self.tools.extend(tools);
        self
    }

    /// Set the maximum loops
    pub fn max_loops(mut self, max_loops: u32) -> Self {
        self.max_loops = max_loops;
        self
    }

    /// Build the agent; without a model handle the process-wide one is resolved
    pub fn build(self) -> Result<Agent> {
        let name = self.name.ok_or_else(|| Error::config("Agent name is required"))?;
        let system_prompt = self
            .system_prompt
            .ok_or_else(|| Error::config("System prompt is required"))?;

        let mut names: Vec<&str> = self.tools.iter().map(|t| t.name()).collect();
        names.sort_unstable();
        if let Some(pair) = names.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(Error::config(format!("duplicate tool name '{}'", pair[0])));
        }

        let model = match self.model {
            Some(model) => model,
            None => get_model()?,
        };

        Ok(Agent {
            id: AgentId::new(),
            name,
            system_prompt,
            max_loops: self.max_loops.max(1),
            model,
            tools: self.tools,
        })
    }
}

impl Default for AgentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Agent output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentOutput {
    /// Agent that produced this output
    pub agent_id: AgentId,
    /// Final answer text
    pub content: String,
    /// Loop trace
    pub trace: ReActTrace,
}

impl AgentOutput {
    /// Create a new agent output
    pub fn new(agent_id: AgentId, content: impl Into<String>, trace: ReActTrace) -> Self {
        Self {
            agent_id,
            content: content.into(),
            trace,
        }
    }
}

impl fmt::Display for AgentOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content)
    }
}
