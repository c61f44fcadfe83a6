//! Trace of the reason/act loop an agent runs against the model

use crate::types::TokenUsage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A trace of one agent run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReActTrace {
    /// Model text produced on each iteration
    pub thoughts: Vec<Thought>,
    /// Actions the model requested
    pub actions: Vec<Action>,
    /// Tool results fed back to the model
    pub observations: Vec<Observation>,
    /// When the trace started
    pub started_at: DateTime<Utc>,
    /// When the trace completed
    pub completed_at: Option<DateTime<Utc>>,
    /// Total token usage across all steps
    pub total_tokens: TokenUsage,
}

impl ReActTrace {
    /// Create a new empty trace
    pub fn new() -> Self {
        Self {
            thoughts: Vec::new(),
            actions: Vec::new(),
            observations: Vec::new(),
            started_at: Utc::now(),
            completed_at: None,
            total_tokens: TokenUsage::default(),
        }
    }

    /// Add a thought to the trace
    pub fn add_thought(&mut self, thought: Thought) {
        self.total_tokens.add(thought.tokens);
        self.thoughts.push(thought);
    }

    /// Add an action to the trace
    pub fn add_action(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// Add an observation to the trace
    pub fn add_observation(&mut self, observation: Observation) {
        self.observations.push(observation);
    }

    /// Mark the trace as completed
    pub fn complete(&mut self) {
        self.completed_at = Some(Utc::now());
    }

    /// Number of model round trips
    pub fn iteration_count(&self) -> usize {
        self.thoughts.len()
    }

    /// Names of the tools called, in order
    pub fn tools_called(&self) -> Vec<&str> {
        self.actions
            .iter()
            .filter_map(|action| match action {
                Action::ToolCall { tool, .. } => Some(tool.as_str()),
                Action::FinalAnswer { .. } => None,
            })
            .collect()
    }
}

impl Default for ReActTrace {
    fn default() -> Self {
        Self::new()
    }
}

/// Model output for one iteration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thought {
    /// The thought content
    pub content: String,
    /// When this thought occurred
    pub timestamp: DateTime<Utc>,
    /// Token usage for generating this thought
    pub tokens: TokenUsage,
}

impl Thought {
    /// Create a new thought
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            timestamp: Utc::now(),
            tokens: TokenUsage::default(),
        }
    }

    /// Set token usage
    pub fn with_tokens(mut self, tokens: TokenUsage) -> Self {
        self.tokens = tokens;
        self
    }
}

/// Action decided by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Invoke a tool
    ToolCall {
        /// Tool name
        tool: String,
        /// Model-assigned call ID
        call_id: String,
        /// Parsed arguments
        params: serde_json::Value,
    },
    /// Finish with an answer
    FinalAnswer {
        /// The answer text
        answer: String,
    },
}

impl Action {
    /// Create a tool call action
    pub fn tool_call(
        tool: impl Into<String>,
        call_id: impl Into<String>,
        params: serde_json::Value,
    ) -> Self {
        Self::ToolCall {
            tool: tool.into(),
            call_id: call_id.into(),
            params,
        }
    }

    /// Create a final answer action
    pub fn final_answer(answer: impl Into<String>) -> Self {
        Self::FinalAnswer {
            answer: answer.into(),
        }
    }
}

/// Tool result observed by the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    /// Content handed back
    pub content: String,
    /// Whether the tool failed
    pub is_error: bool,
    /// When it was observed
    pub timestamp: DateTime<Utc>,
}

impl Observation {
    /// Create a successful observation
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: false,
            timestamp: Utc::now(),
        }
    }

    /// Create an error observation
    pub fn error(content: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::new(content)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_accumulates_tokens_and_tools() {
        let mut trace = ReActTrace::new();
        trace.add_thought(Thought::new("").with_tokens(TokenUsage::new(10, 2)));
        trace.add_action(Action::tool_call("time_agent", "call_1", serde_json::json!({})));
        trace.add_observation(Observation::new("12:00"));
        trace.add_thought(Thought::new("It is noon.").with_tokens(TokenUsage::new(14, 4)));
        trace.add_action(Action::final_answer("It is noon."));
        trace.complete();

        assert_eq!(trace.iteration_count(), 2);
        assert_eq!(trace.tools_called(), vec!["time_agent"]);
        assert_eq!(trace.total_tokens.total_tokens, 30);
        assert!(trace.completed_at.is_some());
    }
}
