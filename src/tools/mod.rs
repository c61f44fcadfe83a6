//! Tool trait, schemas and the built-in mock tools

pub mod clock;
pub mod weather;

pub use clock::{current_time, CurrentTimeTool};
pub use weather::{get_weather, WeatherTool, CONDITIONS};

use crate::error::{Error, Result};
use crate::openrouter::ToolDefinition;
use crate::types::AgentId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Context provided to tools during execution
#[derive(Debug, Clone)]
pub struct ToolContext {
    /// ID of the agent executing the tool
    pub agent_id: AgentId,
    /// Tool call ID assigned by the model
    pub call_id: Option<String>,
}

impl ToolContext {
    /// Create a new tool context
    pub fn new(agent_id: AgentId) -> Self {
        Self {
            agent_id,
            call_id: None,
        }
    }

    /// Attach the model's tool call ID
    pub fn with_call_id(mut self, call_id: impl Into<String>) -> Self {
        self.call_id = Some(call_id.into());
        self
    }
}

/// Output from a tool execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolOutput {
    /// Whether the tool execution was successful
    pub success: bool,
    /// Output content
    pub content: String,
    /// Optional error message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolOutput {
    /// Create a successful tool output
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            success: true,
            content: content.into(),
            error: None,
        }
    }

    /// Create a failed tool output
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            content: String::new(),
            error: Some(error.into()),
        }
    }

    /// Text handed back to the model
    pub fn observation(&self) -> String {
        match (&self.error, self.success) {
            (Some(error), false) => format!("Error: {}", error),
            _ => self.content.clone(),
        }
    }
}

/// JSON Schema for tool parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonSchema {
    /// Schema type
    #[serde(rename = "type")]
    pub schema_type: String,
    /// Schema properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<HashMap<String, Value>>,
    /// Required properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    /// Additional properties
    #[serde(flatten)]
    pub additional: HashMap<String, Value>,
}

impl JsonSchema {
    /// Create an empty object schema
    pub fn empty() -> Self {
        Self {
            schema_type: "object".to_string(),
            properties: Some(HashMap::new()),
            required: None,
            additional: HashMap::new(),
        }
    }

    /// Derive the schema of a typed tool input
    pub fn of<T: schemars::JsonSchema>() -> Self {
        let root = schemars::schema_for!(T);
        let schema = serde_json::to_value(root)
            .and_then(serde_json::from_value::<JsonSchema>)
            .unwrap_or_else(|_| JsonSchema::empty());
        schema.without_metadata()
    }

    fn without_metadata(mut self) -> Self {
        self.additional.remove("$schema");
        self.additional.remove("title");
        if self.properties.is_none() {
            self.properties = Some(HashMap::new());
        }
        self
    }

    /// Check `params` against this schema
    pub fn validate(&self, params: &Value) -> Result<()> {
        let schema = serde_json::to_value(self)?;
        let validator = jsonschema::validator_for(&schema)
            .map_err(|e| Error::InvalidInput(format!("invalid tool schema: {}", e)))?;

        let problems: Vec<String> = match validator.validate(params) {
            Ok(()) => return Ok(()),
            Err(errors) => errors.map(|e| e.to_string()).collect(),
        };
        Err(Error::InvalidInput(problems.join("; ")))
    }
}

/// Tool trait defining the interface for agent capabilities
#[async_trait]
pub trait Tool: Send + Sync {
    /// Name the model calls the tool by
    fn name(&self) -> &str;

    /// Description for LLM function calling
    fn description(&self) -> &str;

    /// JSON Schema for input parameters
    fn input_schema(&self) -> JsonSchema;

    /// Execute the tool with given parameters
    async fn execute(&self, params: Value, ctx: &ToolContext) -> Result<ToolOutput>;

    /// Validate parameters before execution
    fn validate(&self, params: &Value) -> Result<()> {
        self.input_schema().validate(params)
    }

    /// Function-calling descriptor sent to the model
    fn definition(&self) -> Result<ToolDefinition> {
        Ok(ToolDefinition::function(
            self.name(),
            self.description(),
            serde_json::to_value(self.input_schema())?,
        ))
    }
}

/// Create the current time tool
pub fn current_time_tool() -> Arc<dyn Tool> {
    Arc::new(CurrentTimeTool)
}

/// Create the mock weather tool
pub fn weather_tool() -> Arc<dyn Tool> {
    Arc::new(WeatherTool)
}
