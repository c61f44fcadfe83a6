//! Wall-clock tool

use super::{JsonSchema, Tool, ToolContext, ToolOutput};
use crate::error::Result;
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use schemars::JsonSchema as DeriveSchema;
use serde::Deserialize;
use serde_json::Value;

/// Sentence the timestamp is embedded in
pub const CURRENT_TIME_PREFIX: &str = "The current UTC date and time is ";

/// `get_current_time` takes no arguments
#[derive(Debug, Default, Deserialize, DeriveSchema)]
pub struct CurrentTimeInput {}

/// Present UTC time as an ISO-8601 timestamp inside a fixed sentence
pub fn current_time() -> String {
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false);
    format!("{}{}", CURRENT_TIME_PREFIX, now)
}

/// Tool wrapper around [`current_time`]
pub struct CurrentTimeTool;

#[async_trait]
impl Tool for CurrentTimeTool {
    fn name(&self) -> &str {
        "get_current_time"
    }

    fn description(&self) -> &str {
        "Returns the current UTC date and time."
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::of::<CurrentTimeInput>()
    }

    async fn execute(&self, _params: Value, _ctx: &ToolContext) -> Result<ToolOutput> {
        Ok(ToolOutput::success(current_time()))
    }
}
