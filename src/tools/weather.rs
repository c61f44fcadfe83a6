//! Mock weather tool

use super::{JsonSchema, Tool, ToolContext, ToolOutput};
use crate::error::{Error, Result};
use async_trait::async_trait;
use rand::seq::IndexedRandom;
use rand::Rng;
use schemars::JsonSchema as DeriveSchema;
use serde::Deserialize;
use serde_json::Value;
use std::ops::RangeInclusive;

/// Conditions the mock reports
pub const CONDITIONS: [&str; 5] = ["sunny", "partly cloudy", "overcast", "rainy", "snowy"];

/// Temperature range in °C
pub const TEMPERATURE_C: RangeInclusive<i32> = -5..=35;

/// Relative humidity range in percent
pub const HUMIDITY_PCT: RangeInclusive<i32> = 30..=90;

/// Arguments of `get_weather`
#[derive(Debug, Deserialize, DeriveSchema)]
pub struct WeatherInput {
    /// City or place to report the weather for
    pub location: String,
}

/// Random weather for `location`; no real data source is consulted
pub fn get_weather(location: &str) -> String {
    let mut rng = rand::rng();
    let temp_c = rng.random_range(TEMPERATURE_C);
    let condition = CONDITIONS.choose(&mut rng).copied().unwrap_or(CONDITIONS[0]);
    let humidity = rng.random_range(HUMIDITY_PCT);

    format!(
        "Weather in {}: {}, {}°C, humidity {}%",
        location, condition, temp_c, humidity
    )
}

/// Tool wrapper around [`get_weather`]
pub struct WeatherTool;

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        "get_weather"
    }

    fn description(&self) -> &str {
        "Returns the current weather for a given location (mock data)."
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::of::<WeatherInput>()
    }

    async fn execute(&self, params: Value, _ctx: &ToolContext) -> Result<ToolOutput> {
        let input: WeatherInput = serde_json::from_value(params)
            .map_err(|e| Error::tool_execution(self.name(), e.to_string()))?;

        Ok(ToolOutput::success(get_weather(&input.location)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AgentId;
    use regex::Regex;

    fn parse(text: &str) -> (String, String, i32, i32) {
        let pattern =
            Regex::new(r"^Weather in (?s)(.*): ([a-z ]+), (-?\d+)°C, humidity (\d+)%$").unwrap();
        let caps = pattern.captures(text).expect("weather sentence template");
        (
            caps[1].to_string(),
            caps[2].to_string(),
            caps[3].parse().unwrap(),
            caps[4].parse().unwrap(),
        )
    }

    #[test]
    fn test_weather_stays_within_ranges() {
        for _ in 0..1000 {
            let (location, condition, temp, humidity) = parse(&get_weather("Paris"));
            assert_eq!(location, "Paris");
            assert!(CONDITIONS.contains(&condition.as_str()), "{}", condition);
            assert!(TEMPERATURE_C.contains(&temp), "{}", temp);
            assert!(HUMIDITY_PCT.contains(&humidity), "{}", humidity);
        }
    }

    #[test]
    fn test_location_is_embedded_verbatim() {
        for location in ["", "São Paulo", "New York: Manhattan", "  spaced  "] {
            let (parsed, ..) = parse(&get_weather(location));
            assert_eq!(parsed, location);
        }
    }

    #[tokio::test]
    async fn test_tool_requires_location() {
        let tool = WeatherTool;
        assert!(tool.validate(&serde_json::json!({})).is_err());

        let output = tool
            .execute(
                serde_json::json!({"location": "Oslo"}),
                &ToolContext::new(AgentId::new()),
            )
            .await
            .unwrap();
        assert!(output.content.starts_with("Weather in Oslo: "));
    }
}
