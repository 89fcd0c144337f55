//! Tool arbiter configuration

use serde::{Deserialize, Serialize};

/// Configuration for the tool arbitration engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArbiterConfig {
    /// Minimum cosine similarity for an existing tool to be selected
    #[serde(default = "default_match_threshold")]
    pub match_threshold: f32,

    /// Embedding model used for prompts and tool descriptions
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Generated tool inputs longer than this that also contain an "error"
    /// token are treated as generation failures
    #[serde(default = "default_degenerate_input_len")]
    pub degenerate_input_len: usize,
}

fn default_match_threshold() -> f32 {
    0.3
}

fn default_embedding_model() -> String {
    "text-embedding-3-small".to_string()
}

fn default_degenerate_input_len() -> usize {
    100
}

impl Default for ArbiterConfig {
    fn default() -> Self {
        Self {
            match_threshold: default_match_threshold(),
            embedding_model: default_embedding_model(),
            degenerate_input_len: default_degenerate_input_len(),
        }
    }
}

impl ArbiterConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the similarity threshold for tool selection
    pub fn with_match_threshold(mut self, threshold: f32) -> Self {
        self.match_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Set the embedding model
    pub fn with_embedding_model(mut self, model: impl Into<String>) -> Self {
        self.embedding_model = model.into();
        self
    }

    /// Set the degenerate-input length heuristic
    pub fn with_degenerate_input_len(mut self, len: usize) -> Self {
        self.degenerate_input_len = len;
        self
    }
}
