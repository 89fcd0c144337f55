//! Tool registry trait

use std::fmt::Debug;

use async_trait::async_trait;

use super::ToolDescriptor;
use crate::domain::DomainError;

/// Best-matching tool for a query embedding
#[derive(Debug, Clone)]
pub struct ToolMatch {
    /// The matched tool's descriptor
    pub descriptor: ToolDescriptor,
    /// Best cosine similarity over the tool's embedding set
    pub similarity: f32,
}

impl ToolMatch {
    /// Create a new match
    pub fn new(descriptor: ToolDescriptor, similarity: f32) -> Self {
        Self {
            descriptor,
            similarity,
        }
    }
}

/// Trait for the registry owning tool descriptors
///
/// Descriptors keep their registration order: ties in similarity matching are
/// broken in favor of the earliest-registered tool, deterministically.
#[async_trait]
pub trait ToolRegistry: Send + Sync + Debug {
    /// Register a new descriptor; fails with a conflict if the name exists
    async fn register(&self, descriptor: ToolDescriptor) -> Result<(), DomainError>;

    /// Fetch a descriptor by name
    async fn get(&self, name: &str) -> Result<Option<ToolDescriptor>, DomainError>;

    /// Check whether a name is registered
    async fn contains(&self, name: &str) -> Result<bool, DomainError>;

    /// List all descriptors in registration order
    async fn list(&self) -> Result<Vec<ToolDescriptor>, DomainError>;

    /// Append a reinforcement embedding to the named tool, deduplicated by
    /// exact value; returns `false` when the vector was already present
    async fn add_reinforcement(&self, name: &str, embedding: Vec<f32>)
        -> Result<bool, DomainError>;

    /// Find the best-matching tool for the query embedding
    ///
    /// Tools named in `exclude` are filtered out before scoring, and dormant
    /// descriptors (no embeddings) never match. Returns the single best
    /// (tool, similarity) pair with ties broken by registration order, or
    /// `None` when no tool has an embedding to score against.
    async fn best_match(
        &self,
        embedding: &[f32],
        exclude: &[String],
    ) -> Result<Option<ToolMatch>, DomainError>;

    /// Get the number of registered tools
    async fn len(&self) -> Result<usize, DomainError>;

    /// Check whether the registry is empty
    async fn is_empty(&self) -> Result<bool, DomainError> {
        Ok(self.len().await? == 0)
    }
}
