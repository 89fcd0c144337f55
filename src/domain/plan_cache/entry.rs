//! Cached plan entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A prompt -> action-plan mapping stored in the semantic cache
///
/// Identity, prompt, embedding and actions are immutable once stored; only
/// the reliability score (and its timestamp) changes over the entry's life.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedPlan {
    /// Unique identifier for this entry
    id: Uuid,
    /// The original prompt text
    prompt_raw: String,
    /// The embedding vector for similarity search, approximately unit-norm
    embedding: Vec<f32>,
    /// The stored action-plan, in execution order
    actions: Vec<String>,
    /// Reliability score in [0, 1]
    score: f64,
    /// When this entry was created
    created_at: DateTime<Utc>,
    /// When the score was last updated
    updated_at: DateTime<Utc>,
}

impl CachedPlan {
    /// Initial reliability score for a freshly stored plan
    pub const INITIAL_SCORE: f64 = 1.0;

    /// Create a new cached plan with a fresh id and full score
    pub fn new(
        prompt_raw: impl Into<String>,
        embedding: Vec<f32>,
        actions: Vec<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            prompt_raw: prompt_raw.into(),
            embedding,
            actions,
            score: Self::INITIAL_SCORE,
            created_at: now,
            updated_at: now,
        }
    }

    /// Get the entry id
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Get the original prompt text
    pub fn prompt_raw(&self) -> &str {
        &self.prompt_raw
    }

    /// Get the embedding vector
    pub fn embedding(&self) -> &[f32] {
        &self.embedding
    }

    /// Get the stored action-plan
    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    /// Get the current reliability score
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Get the creation timestamp
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Get the last score-update timestamp
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replace the reliability score and refresh the update timestamp
    pub(crate) fn set_score(&mut self, score: f64) {
        self.score = score;
        self.updated_at = Utc::now();
    }
}
