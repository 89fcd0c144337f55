//! Synthesized tool implementation

use async_trait::async_trait;

use crate::domain::tool::Tool;

/// A tool defined at runtime by the LLM
///
/// Every synthesized tool is backed by this one type. Execution is a
/// placeholder acknowledgement; the definition exists so the tool can be
/// matched and selected on later turns, not to run real game logic.
#[derive(Debug, Clone)]
pub struct DynamicTool {
    name: String,
    description: String,
}

impl DynamicTool {
    /// Create a dynamic tool from a synthesized name and description
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

#[async_trait]
impl Tool for DynamicTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn invoke(&self, input: &str) -> String {
        format!(
            "Executed dynamically defined tool '{}' with input '{}'.",
            self.name, input
        )
    }
}
