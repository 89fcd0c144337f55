//! Infrastructure services

mod agent_runner;
mod plan_cache_service;
mod tool_arbiter_service;

pub use agent_runner::AgentRunner;
pub use plan_cache_service::{PlanCacheHit, PlanCacheService};
pub use tool_arbiter_service::ToolArbiterService;
