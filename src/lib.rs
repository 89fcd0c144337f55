//! Semantic agent core
//!
//! Two cooperating subsystems behind a small CLI:
//! - a semantic plan cache that reuses previously successful action-plans for
//!   semantically similar prompts, scored by user feedback
//! - a tool arbitration engine that matches requests to tools by embedding
//!   similarity and synthesizes new tool definitions when nothing qualifies

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
