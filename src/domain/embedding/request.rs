//! Embedding request types

use serde::{Deserialize, Serialize};

/// Request for generating an embedding from a single text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    /// Model to generate the embedding with
    model: String,
    /// The text to embed
    input: String,
}

impl EmbeddingRequest {
    /// Create a new embedding request
    pub fn new(model: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            input: input.into(),
        }
    }

    /// Get the model name
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Get the input text
    pub fn input(&self) -> &str {
        &self.input
    }
}
