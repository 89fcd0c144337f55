//! Semantic plan cache domain types
//!
//! Maps user prompts to previously successful action-plans, keyed by
//! embedding similarity rather than exact text. Entries carry a reliability
//! score updated from user feedback; entries whose score falls below the
//! configured floor are evicted.

mod config;
mod entry;
mod index;

pub use config::PlanCacheConfig;
pub use entry::CachedPlan;
pub use index::{PlanSearchResult, VectorIndex};
