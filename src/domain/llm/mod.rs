//! LLM provider domain trait
//!
//! The arbiter treats text generation as an opaque collaborator: a prompt and
//! optional stop sequences go in, a completion string comes out. Structured
//! protocols (tool definitions, think/act steps) are parsed by the callers.

mod provider;

pub use provider::LlmProvider;

#[cfg(test)]
pub use provider::mock::MockLlmProvider;
