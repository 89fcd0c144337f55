//! Tool capability trait

use std::fmt::Debug;

use async_trait::async_trait;

/// Trait for an invocable agent capability
///
/// Observations are plain strings. A tool signals a soft failure by prefixing
/// its observation with "Error" text; callers surface that observation as-is
/// and never convert it into an error value.
#[async_trait]
pub trait Tool: Send + Sync + Debug {
    /// The tool's unique name
    fn name(&self) -> &str;

    /// Human-readable description, also used for embedding at registration
    fn description(&self) -> &str;

    /// Execute the tool with the given input and return an observation
    async fn invoke(&self, input: &str) -> String;
}
