//! Tool domain types
//!
//! Tools are the agent's capabilities. Statically defined tools and
//! LLM-synthesized ones share the same [`Tool`] interface; the registry keeps
//! one [`ToolDescriptor`] per tool for embedding-based matching and
//! reinforcement bookkeeping.

mod config;
mod descriptor;
mod invocation;
mod registry;
#[allow(clippy::module_inception)]
mod tool;

pub use config::ArbiterConfig;
pub use descriptor::ToolDescriptor;
pub use invocation::InvocationRecord;
pub use registry::{ToolMatch, ToolRegistry};
pub use tool::Tool;
