//! Vector index trait and search types

use std::fmt::Debug;

use async_trait::async_trait;
use uuid::Uuid;

use super::CachedPlan;
use crate::domain::DomainError;

/// Result of a nearest-neighbor query against the index
#[derive(Debug, Clone)]
pub struct PlanSearchResult {
    /// The matching cached plan
    pub plan: CachedPlan,
    /// Cosine similarity to the query vector (0.0 to 1.0 for unit-norm input)
    pub similarity: f32,
}

impl PlanSearchResult {
    /// Create a new search result
    pub fn new(plan: CachedPlan, similarity: f32) -> Self {
        Self { plan, similarity }
    }
}

/// Trait for the vector index backing the semantic plan cache
///
/// Concurrent reads must be safe; writes are atomic per entry so a concurrent
/// query observes either the old state or the new one, never a torn read.
#[async_trait]
pub trait VectorIndex: Send + Sync + Debug {
    /// Insert a new plan into the index
    async fn insert(&self, plan: CachedPlan) -> Result<(), DomainError>;

    /// Fetch a plan by id
    async fn get(&self, id: Uuid) -> Result<Option<CachedPlan>, DomainError>;

    /// Replace the score of an existing plan, refreshing its update
    /// timestamp; returns `false` if the id is not present
    async fn update_score(&self, id: Uuid, score: f64) -> Result<bool, DomainError>;

    /// Remove a plan by id; returns `false` if the id was not present
    async fn remove(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Query the k nearest neighbors by cosine similarity, nearest first
    async fn search(&self, embedding: &[f32], k: usize)
        -> Result<Vec<PlanSearchResult>, DomainError>;

    /// Get the number of entries in the index
    async fn len(&self) -> Result<usize, DomainError>;

    /// Check whether the index is empty
    async fn is_empty(&self) -> Result<bool, DomainError> {
        Ok(self.len().await? == 0)
    }
}
