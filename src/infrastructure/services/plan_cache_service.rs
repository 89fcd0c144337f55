//! Semantic plan caching service
//!
//! Maps free-form prompts to previously successful action-plans by embedding
//! similarity, scores entries with an exponential moving average of user
//! feedback, and evicts entries whose reliability drops below the floor.

use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::embedding::{EmbeddingProvider, EmbeddingRequest};
use crate::domain::plan_cache::{CachedPlan, PlanCacheConfig, VectorIndex};
use crate::domain::DomainError;

/// A cache hit returned by `lookup`
#[derive(Debug, Clone)]
pub struct PlanCacheHit {
    /// Id of the matched entry
    pub id: Uuid,
    /// The stored action-plan, in execution order
    pub actions: Vec<String>,
    /// Cosine similarity between query and stored prompt
    pub similarity: f32,
    /// The entry's reliability score at lookup time
    pub score: f64,
    /// The prompt the plan was originally stored under
    pub prompt_raw: String,
}

/// Semantic plan cache service
#[derive(Debug)]
pub struct PlanCacheService {
    index: Arc<dyn VectorIndex>,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    config: PlanCacheConfig,
}

impl PlanCacheService {
    /// Create a new plan cache service with default config
    pub fn new(index: Arc<dyn VectorIndex>, embedding_provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self::with_config(index, embedding_provider, PlanCacheConfig::default())
    }

    /// Create a new plan cache service with custom config
    pub fn with_config(
        index: Arc<dyn VectorIndex>,
        embedding_provider: Arc<dyn EmbeddingProvider>,
        config: PlanCacheConfig,
    ) -> Self {
        Self {
            index,
            embedding_provider,
            config,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &PlanCacheConfig {
        &self.config
    }

    async fn generate_embedding(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        let request = EmbeddingRequest::new(&self.config.embedding_model, text);
        let response = self.embedding_provider.embed(request).await?;

        Ok(response.into_vector())
    }

    /// Look up an action-plan for a semantically similar prompt
    ///
    /// Scans the top-K nearest entries in similarity order and returns the
    /// first one clearing both the similarity threshold and the score floor.
    /// Embedding failures degrade to a miss.
    pub async fn lookup(&self, prompt: &str) -> Result<Option<PlanCacheHit>, DomainError> {
        let embedding = match self.generate_embedding(prompt).await {
            Ok(embedding) => embedding,
            Err(e) => {
                warn!("Failed to generate embedding for cache lookup: {}", e);
                return Ok(None);
            }
        };

        if self.index.is_empty().await? {
            return Ok(None);
        }

        let candidates = self.index.search(&embedding, self.config.top_k).await?;

        for candidate in candidates {
            if candidate.similarity < self.config.similarity_threshold {
                // Candidates arrive nearest-first, nothing further qualifies
                break;
            }

            if candidate.plan.score() < self.config.min_score {
                continue;
            }

            debug!(
                "Plan cache hit with similarity {:.4}, score {:.4} for entry {}",
                candidate.similarity,
                candidate.plan.score(),
                candidate.plan.id()
            );

            return Ok(Some(PlanCacheHit {
                id: candidate.plan.id(),
                actions: candidate.plan.actions().to_vec(),
                similarity: candidate.similarity,
                score: candidate.plan.score(),
                prompt_raw: candidate.plan.prompt_raw().to_string(),
            }));
        }

        debug!("Plan cache miss for prompt: {}...", log_excerpt(prompt));

        Ok(None)
    }

    /// Store a new action-plan for the given prompt
    ///
    /// Always creates an independent entry with a fresh id and full score;
    /// identical prompt texts never merge. Embedding failures degrade to not
    /// storing anything.
    pub async fn store(
        &self,
        prompt: &str,
        actions: Vec<String>,
    ) -> Result<Option<Uuid>, DomainError> {
        let embedding = match self.generate_embedding(prompt).await {
            Ok(embedding) => embedding,
            Err(e) => {
                warn!("Failed to generate embedding for plan storage: {}", e);
                return Ok(None);
            }
        };

        let plan = CachedPlan::new(prompt, embedding, actions);
        let id = plan.id();

        self.index.insert(plan).await?;

        debug!("Stored plan {} for prompt: {}...", id, log_excerpt(prompt));

        Ok(Some(id))
    }

    /// Fold one feedback event into an entry's reliability score
    ///
    /// `new = alpha * outcome + (1 - alpha) * old`. When the updated score
    /// falls below the floor the entry is deleted in the same call; deletion
    /// is terminal. Returns `false` for an id that is no longer present.
    pub async fn update_reward(&self, id: Uuid, success: bool) -> Result<bool, DomainError> {
        let Some(plan) = self.index.get(id).await? else {
            return Ok(false);
        };

        let outcome = if success { 1.0 } else { 0.0 };
        let alpha = self.config.reward_alpha;
        let new_score = alpha * outcome + (1.0 - alpha) * plan.score();

        if new_score < self.config.min_score {
            self.index.remove(id).await?;
            debug!(
                "Evicted plan {} with score {:.4} below floor {:.4}",
                id, new_score, self.config.min_score
            );
        } else {
            self.index.update_score(id, new_score).await?;
            debug!("Updated plan {} score to {:.4}", id, new_score);
        }

        Ok(true)
    }

    /// Get the number of cached plans
    pub async fn len(&self) -> Result<usize, DomainError> {
        self.index.len().await
    }
}

// Truncates on a char boundary; byte slicing would panic on multibyte prompts
fn log_excerpt(prompt: &str) -> String {
    prompt.chars().take(50).collect()
}
