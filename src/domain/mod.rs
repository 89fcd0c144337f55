//! Domain layer - Core business logic and entities

pub mod embedding;
pub mod error;
pub mod llm;
pub mod plan_cache;
pub mod tool;

pub use embedding::{cosine_similarity, EmbeddingProvider, EmbeddingRequest, EmbeddingResponse};
pub use error::DomainError;
pub use llm::LlmProvider;
pub use plan_cache::{CachedPlan, PlanCacheConfig, PlanSearchResult, VectorIndex};
pub use tool::{
    ArbiterConfig, InvocationRecord, Tool, ToolDescriptor, ToolMatch, ToolRegistry,
};
