//! Plan cache configuration

use serde::{Deserialize, Serialize};

/// Configuration for the semantic plan cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanCacheConfig {
    /// Similarity threshold (TAU) a candidate must clear to be a lookup hit
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f32,

    /// Minimum reliability score (EPSILON) an entry must retain to be
    /// returned, or to avoid eviction
    #[serde(default = "default_min_score")]
    pub min_score: f64,

    /// EMA smoothing factor (ALPHA) weighting the most recent feedback event
    #[serde(default = "default_reward_alpha")]
    pub reward_alpha: f64,

    /// Number of nearest neighbors scanned per lookup
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Embedding model to use
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,
}

fn default_similarity_threshold() -> f32 {
    0.60
}

fn default_min_score() -> f64 {
    0.2
}

fn default_reward_alpha() -> f64 {
    0.3
}

fn default_top_k() -> usize {
    3
}

fn default_embedding_model() -> String {
    "text-embedding-3-small".to_string()
}

impl Default for PlanCacheConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: default_similarity_threshold(),
            min_score: default_min_score(),
            reward_alpha: default_reward_alpha(),
            top_k: default_top_k(),
            embedding_model: default_embedding_model(),
        }
    }
}

impl PlanCacheConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the similarity threshold
    pub fn with_similarity_threshold(mut self, threshold: f32) -> Self {
        self.similarity_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Set the minimum score
    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score.clamp(0.0, 1.0);
        self
    }

    /// Set the EMA smoothing factor
    pub fn with_reward_alpha(mut self, alpha: f64) -> Self {
        self.reward_alpha = alpha.clamp(0.0, 1.0);
        self
    }

    /// Set the number of neighbors scanned per lookup
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k.max(1);
        self
    }

    /// Set the embedding model
    pub fn with_embedding_model(mut self, model: impl Into<String>) -> Self {
        self.embedding_model = model.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PlanCacheConfig::default();

        assert!((config.similarity_threshold - 0.60).abs() < 0.001);
        assert!((config.min_score - 0.2).abs() < 0.001);
        assert!((config.reward_alpha - 0.3).abs() < 0.001);
        assert_eq!(config.top_k, 3);
        assert_eq!(config.embedding_model, "text-embedding-3-small");
    }

    #[test]
    fn test_config_builder() {
        let config = PlanCacheConfig::new()
            .with_similarity_threshold(0.8)
            .with_min_score(0.1)
            .with_reward_alpha(0.5)
            .with_top_k(5)
            .with_embedding_model("custom-model");

        assert!((config.similarity_threshold - 0.8).abs() < 0.001);
        assert!((config.min_score - 0.1).abs() < 0.001);
        assert!((config.reward_alpha - 0.5).abs() < 0.001);
        assert_eq!(config.top_k, 5);
        assert_eq!(config.embedding_model, "custom-model");
    }

    #[test]
    fn test_thresholds_clamped() {
        let config = PlanCacheConfig::new()
            .with_similarity_threshold(1.5)
            .with_min_score(-0.5)
            .with_top_k(0);

        assert!((config.similarity_threshold - 1.0).abs() < 0.001);
        assert!(config.min_score.abs() < 0.001);
        assert_eq!(config.top_k, 1);
    }
}
