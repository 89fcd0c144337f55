//! Per-run invocation records

use serde::{Deserialize, Serialize};

/// One step in an arbiter run's history
///
/// Ephemeral: records exist so the caller can attribute feedback after the
/// run completes; they are not persisted by the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InvocationRecord {
    /// A real tool invocation with its observation
    ToolInvocation {
        tool_name: String,
        tool_input: String,
        observation: String,
        similarity: f32,
    },
    /// A new tool was synthesized; it was not executed in this run
    ToolSynthesis { tool_name: String },
    /// A tool-free answer generated directly by the LLM
    DirectAnswer { answer: String },
}

impl InvocationRecord {
    /// The tool this record refers to, if any
    pub fn tool_name(&self) -> Option<&str> {
        match self {
            Self::ToolInvocation { tool_name, .. } | Self::ToolSynthesis { tool_name } => {
                Some(tool_name)
            }
            Self::DirectAnswer { .. } => None,
        }
    }

    /// Whether this record is a real tool invocation
    pub fn is_invocation(&self) -> bool {
        matches!(self, Self::ToolInvocation { .. })
    }

    /// Render this record as a single action line for plan storage
    pub fn to_action_string(&self) -> String {
        match self {
            Self::ToolInvocation {
                tool_name,
                tool_input,
                observation,
                similarity,
            } => format!(
                "Tool: {}, Similarity: {:.2}, Input: '{}', Observation: '{}'",
                tool_name, similarity, tool_input, observation
            ),
            Self::ToolSynthesis { tool_name } => {
                format!("Defined new tool: {}", tool_name)
            }
            Self::DirectAnswer { answer } => format!("Direct Answer: {}", answer),
        }
    }
}
