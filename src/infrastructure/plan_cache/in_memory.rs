//! In-memory vector index implementation

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::embedding::cosine_similarity;
use crate::domain::plan_cache::{CachedPlan, PlanSearchResult, VectorIndex};
use crate::domain::DomainError;

/// In-memory vector index using linear search
///
/// Suitable for a single process with modest cache sizes; swap in an
/// ANN-backed implementation behind the same trait for larger deployments.
#[derive(Debug, Default)]
pub struct InMemoryVectorIndex {
    entries: RwLock<HashMap<Uuid, CachedPlan>>,
}

impl InMemoryVectorIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl VectorIndex for InMemoryVectorIndex {
    async fn insert(&self, plan: CachedPlan) -> Result<(), DomainError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| DomainError::internal(format!("Failed to acquire write lock: {}", e)))?;

        entries.insert(plan.id(), plan);

        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<CachedPlan>, DomainError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| DomainError::internal(format!("Failed to acquire read lock: {}", e)))?;

        Ok(entries.get(&id).cloned())
    }

    async fn update_score(&self, id: Uuid, score: f64) -> Result<bool, DomainError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| DomainError::internal(format!("Failed to acquire write lock: {}", e)))?;

        match entries.get_mut(&id) {
            Some(plan) => {
                plan.set_score(score);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| DomainError::internal(format!("Failed to acquire write lock: {}", e)))?;

        Ok(entries.remove(&id).is_some())
    }

    async fn search(
        &self,
        embedding: &[f32],
        k: usize,
    ) -> Result<Vec<PlanSearchResult>, DomainError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| DomainError::internal(format!("Failed to acquire read lock: {}", e)))?;

        let mut results: Vec<PlanSearchResult> = entries
            .values()
            .map(|plan| {
                let similarity = cosine_similarity(embedding, plan.embedding());
                PlanSearchResult::new(plan.clone(), similarity)
            })
            .collect();

        // Sort by similarity descending
        results.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        results.truncate(k);

        Ok(results)
    }

    async fn len(&self) -> Result<usize, DomainError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| DomainError::internal(format!("Failed to acquire read lock: {}", e)))?;

        Ok(entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_plan(prompt: &str, embedding: Vec<f32>) -> CachedPlan {
        CachedPlan::new(prompt, embedding, vec![format!("action for {}", prompt)])
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let index = InMemoryVectorIndex::new();
        let plan = create_plan("hello", vec![1.0, 0.0]);
        let id = plan.id();

        index.insert(plan).await.unwrap();

        let fetched = index.get(id).await.unwrap();
        assert!(fetched.is_some());
        assert_eq!(fetched.unwrap().prompt_raw(), "hello");
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let index = InMemoryVectorIndex::new();
        assert!(index.get(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_score() {
        let index = InMemoryVectorIndex::new();
        let plan = create_plan("hello", vec![1.0, 0.0]);
        let id = plan.id();
        index.insert(plan).await.unwrap();

        assert!(index.update_score(id, 0.7).await.unwrap());

        let fetched = index.get(id).await.unwrap().unwrap();
        assert!((fetched.score() - 0.7).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_update_score_missing_returns_false() {
        let index = InMemoryVectorIndex::new();
        assert!(!index.update_score(Uuid::new_v4(), 0.5).await.unwrap());
    }

    #[tokio::test]
    async fn test_remove() {
        let index = InMemoryVectorIndex::new();
        let plan = create_plan("hello", vec![1.0, 0.0]);
        let id = plan.id();
        index.insert(plan).await.unwrap();

        assert!(index.remove(id).await.unwrap());
        assert!(!index.remove(id).await.unwrap());
        assert!(index.get(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_search_orders_by_similarity() {
        let index = InMemoryVectorIndex::new();
        index
            .insert(create_plan("low", vec![0.5, 0.5, 0.5]))
            .await
            .unwrap();
        index
            .insert(create_plan("high", vec![0.99, 0.1, 0.0]))
            .await
            .unwrap();
        index
            .insert(create_plan("medium", vec![0.8, 0.3, 0.0]))
            .await
            .unwrap();

        let results = index.search(&[1.0, 0.0, 0.0], 3).await.unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].plan.prompt_raw(), "high");
        assert_eq!(results[1].plan.prompt_raw(), "medium");
        assert_eq!(results[2].plan.prompt_raw(), "low");
    }

    #[tokio::test]
    async fn test_search_truncates_to_k() {
        let index = InMemoryVectorIndex::new();
        for i in 0..5 {
            index
                .insert(create_plan(&format!("p{}", i), vec![1.0, i as f32 * 0.1]))
                .await
                .unwrap();
        }

        let results = index.search(&[1.0, 0.0], 3).await.unwrap();
        assert_eq!(results.len(), 3);
    }

    #[tokio::test]
    async fn test_search_empty_index() {
        let index = InMemoryVectorIndex::new();
        let results = index.search(&[1.0, 0.0], 3).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_len_and_is_empty() {
        let index = InMemoryVectorIndex::new();
        assert!(index.is_empty().await.unwrap());

        index
            .insert(create_plan("hello", vec![1.0, 0.0]))
            .await
            .unwrap();

        assert_eq!(index.len().await.unwrap(), 1);
        assert!(!index.is_empty().await.unwrap());
    }
}
