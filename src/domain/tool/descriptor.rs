//! Tool descriptor entity

use serde::{Deserialize, Serialize};

use crate::domain::embedding::cosine_similarity;

/// Matching metadata for a registered tool
///
/// The primary embedding is computed from the tool's name and description at
/// registration and never replaced; it is `None` when embedding generation
/// failed, which leaves the descriptor dormant for similarity matching while
/// still blocking duplicate names. Reinforcement embeddings are prompts the
/// user upvoted, appended over time to widen the tool's semantic catchment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Unique tool name
    name: String,
    /// Tool description
    description: String,
    /// Embedding of the tool's own name/description
    primary_embedding: Option<Vec<f32>>,
    /// Embeddings of upvoted prompts, append-only, deduplicated by value
    reinforcement_embeddings: Vec<Vec<f32>>,
}

impl ToolDescriptor {
    /// Create a descriptor without any embeddings
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            primary_embedding: None,
            reinforcement_embeddings: Vec::new(),
        }
    }

    /// Set the primary embedding
    pub fn with_primary_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.primary_embedding = Some(embedding);
        self
    }

    /// Get the tool name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the tool description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Get the primary embedding, if one was computed
    pub fn primary_embedding(&self) -> Option<&[f32]> {
        self.primary_embedding.as_deref()
    }

    /// Get the reinforcement embeddings
    pub fn reinforcement_embeddings(&self) -> &[Vec<f32>] {
        &self.reinforcement_embeddings
    }

    /// Whether this descriptor participates in similarity matching
    pub fn has_embeddings(&self) -> bool {
        self.primary_embedding.is_some() || !self.reinforcement_embeddings.is_empty()
    }

    /// Append a reinforcement embedding, deduplicated by exact value;
    /// returns `false` if the vector was already present
    pub fn add_reinforcement(&mut self, embedding: Vec<f32>) -> bool {
        if self.reinforcement_embeddings.contains(&embedding) {
            return false;
        }

        self.reinforcement_embeddings.push(embedding);
        true
    }

    /// Maximum cosine similarity between the query and this tool's embedding
    /// set (primary plus reinforcements); `None` when the tool is dormant
    pub fn best_similarity(&self, query: &[f32]) -> Option<f32> {
        self.primary_embedding
            .iter()
            .map(|e| e.as_slice())
            .chain(self.reinforcement_embeddings.iter().map(|e| e.as_slice()))
            .map(|e| cosine_similarity(query, e))
            .fold(None, |best, sim| match best {
                Some(b) if b >= sim => Some(b),
                _ => Some(sim),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_without_embeddings_is_dormant() {
        let descriptor = ToolDescriptor::new("weather", "Reports the weather");

        assert!(!descriptor.has_embeddings());
        assert_eq!(descriptor.best_similarity(&[1.0, 0.0]), None);
    }

    #[test]
    fn test_reinforcement_dedup() {
        let mut descriptor = ToolDescriptor::new("weather", "Reports the weather");

        assert!(descriptor.add_reinforcement(vec![1.0, 0.0]));
        assert!(!descriptor.add_reinforcement(vec![1.0, 0.0]));
        assert!(descriptor.add_reinforcement(vec![0.0, 1.0]));
        assert_eq!(descriptor.reinforcement_embeddings().len(), 2);
    }

    #[test]
    fn test_best_similarity_takes_max_over_set() {
        let mut descriptor = ToolDescriptor::new("weather", "Reports the weather")
            .with_primary_embedding(vec![1.0, 0.0]);
        descriptor.add_reinforcement(vec![0.0, 1.0]);

        // Query aligned with the reinforcement, not the primary
        let best = descriptor.best_similarity(&[0.0, 1.0]).unwrap();
        assert!((best - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_reinforcement_widens_catchment() {
        let mut descriptor = ToolDescriptor::new("weather", "Reports the weather")
            .with_primary_embedding(vec![1.0, 0.0]);

        let query = vec![0.6, 0.8];
        let before = descriptor.best_similarity(&query).unwrap();

        descriptor.add_reinforcement(vec![0.6, 0.8]);
        let after = descriptor.best_similarity(&query).unwrap();

        assert!(after >= before);
    }
}
