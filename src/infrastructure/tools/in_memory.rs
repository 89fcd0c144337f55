//! In-memory tool registry implementation

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::tool::{ToolDescriptor, ToolMatch, ToolRegistry};
use crate::domain::DomainError;

/// In-memory tool registry
///
/// Descriptors are kept in a vector so registration order survives; the
/// best-match scan relies on that order to break similarity ties
/// deterministically. A single writer lock serializes synthesis and
/// reinforcement appends against selection scans.
#[derive(Debug, Default)]
pub struct InMemoryToolRegistry {
    descriptors: RwLock<Vec<ToolDescriptor>>,
}

impl InMemoryToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            descriptors: RwLock::new(Vec::new()),
        }
    }

    /// Create a registry pre-populated with the given descriptors
    pub fn with_descriptors(
        descriptors: Vec<ToolDescriptor>,
    ) -> Result<Self, DomainError> {
        let registry = Self::new();
        {
            let mut guard = registry
                .descriptors
                .write()
                .map_err(|e| DomainError::internal(format!("Failed to acquire write lock: {}", e)))?;

            for descriptor in descriptors {
                if guard.iter().any(|d| d.name() == descriptor.name()) {
                    return Err(DomainError::conflict(format!(
                        "Tool '{}' already registered",
                        descriptor.name()
                    )));
                }
                guard.push(descriptor);
            }
        }

        Ok(registry)
    }
}

#[async_trait]
impl ToolRegistry for InMemoryToolRegistry {
    async fn register(&self, descriptor: ToolDescriptor) -> Result<(), DomainError> {
        let mut descriptors = self
            .descriptors
            .write()
            .map_err(|e| DomainError::internal(format!("Failed to acquire write lock: {}", e)))?;

        if descriptors.iter().any(|d| d.name() == descriptor.name()) {
            return Err(DomainError::conflict(format!(
                "Tool '{}' already registered",
                descriptor.name()
            )));
        }

        descriptors.push(descriptor);

        Ok(())
    }

    async fn get(&self, name: &str) -> Result<Option<ToolDescriptor>, DomainError> {
        let descriptors = self
            .descriptors
            .read()
            .map_err(|e| DomainError::internal(format!("Failed to acquire read lock: {}", e)))?;

        Ok(descriptors.iter().find(|d| d.name() == name).cloned())
    }

    async fn contains(&self, name: &str) -> Result<bool, DomainError> {
        let descriptors = self
            .descriptors
            .read()
            .map_err(|e| DomainError::internal(format!("Failed to acquire read lock: {}", e)))?;

        Ok(descriptors.iter().any(|d| d.name() == name))
    }

    async fn list(&self) -> Result<Vec<ToolDescriptor>, DomainError> {
        let descriptors = self
            .descriptors
            .read()
            .map_err(|e| DomainError::internal(format!("Failed to acquire read lock: {}", e)))?;

        Ok(descriptors.clone())
    }

    async fn add_reinforcement(
        &self,
        name: &str,
        embedding: Vec<f32>,
    ) -> Result<bool, DomainError> {
        let mut descriptors = self
            .descriptors
            .write()
            .map_err(|e| DomainError::internal(format!("Failed to acquire write lock: {}", e)))?;

        let descriptor = descriptors
            .iter_mut()
            .find(|d| d.name() == name)
            .ok_or_else(|| DomainError::not_found(format!("Tool '{}' not registered", name)))?;

        Ok(descriptor.add_reinforcement(embedding))
    }

    async fn best_match(
        &self,
        embedding: &[f32],
        exclude: &[String],
    ) -> Result<Option<ToolMatch>, DomainError> {
        let descriptors = self
            .descriptors
            .read()
            .map_err(|e| DomainError::internal(format!("Failed to acquire read lock: {}", e)))?;

        let mut best: Option<ToolMatch> = None;

        for descriptor in descriptors.iter() {
            if exclude.iter().any(|name| name == descriptor.name()) {
                continue;
            }

            let Some(similarity) = descriptor.best_similarity(embedding) else {
                continue;
            };

            // Strictly-greater keeps the earliest-registered tool on ties
            let improves = best
                .as_ref()
                .map(|b| similarity > b.similarity)
                .unwrap_or(true);

            if improves {
                best = Some(ToolMatch::new(descriptor.clone(), similarity));
            }
        }

        Ok(best)
    }

    async fn len(&self) -> Result<usize, DomainError> {
        let descriptors = self
            .descriptors
            .read()
            .map_err(|e| DomainError::internal(format!("Failed to acquire read lock: {}", e)))?;

        Ok(descriptors.len())
    }
}
