//! Infrastructure layer - External service implementations

pub mod embedding;
pub mod llm;
pub mod observability;
pub mod plan_cache;
pub mod services;
pub mod tools;
