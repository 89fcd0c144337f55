//! Tool arbitration service
//!
//! Routes a request to the best existing tool by embedding similarity,
//! synthesizes a new tool definition via the LLM when nothing qualifies, and
//! folds upvote feedback back into the matching data. Downvotes are handled
//! by the caller through exclusion sets; the registry keeps no negative state.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::domain::embedding::{EmbeddingProvider, EmbeddingRequest};
use crate::domain::llm::LlmProvider;
use crate::domain::tool::{
    ArbiterConfig, InvocationRecord, Tool, ToolDescriptor, ToolMatch, ToolRegistry,
};
use crate::domain::DomainError;
use crate::infrastructure::tools::DynamicTool;

static TOOL_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*Tool Name:\s*(.+?)\s*$").expect("invalid tool name regex")
});
static TOOL_DESCRIPTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*Tool Description:\s*(.+?)\s*$").expect("invalid tool description regex")
});

const FALLBACK_ANSWER: &str =
    "I was unable to process this request. Please try rephrasing it.";

/// Tool arbitration service
#[derive(Debug)]
pub struct ToolArbiterService {
    registry: Arc<dyn ToolRegistry>,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    llm_provider: Arc<dyn LlmProvider>,
    executors: RwLock<HashMap<String, Arc<dyn Tool>>>,
    config: ArbiterConfig,
}

impl ToolArbiterService {
    /// Create a new arbiter with default config
    pub fn new(
        registry: Arc<dyn ToolRegistry>,
        embedding_provider: Arc<dyn EmbeddingProvider>,
        llm_provider: Arc<dyn LlmProvider>,
    ) -> Self {
        Self::with_config(
            registry,
            embedding_provider,
            llm_provider,
            ArbiterConfig::default(),
        )
    }

    /// Create a new arbiter with custom config
    pub fn with_config(
        registry: Arc<dyn ToolRegistry>,
        embedding_provider: Arc<dyn EmbeddingProvider>,
        llm_provider: Arc<dyn LlmProvider>,
        config: ArbiterConfig,
    ) -> Self {
        Self {
            registry,
            embedding_provider,
            llm_provider,
            executors: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &ArbiterConfig {
        &self.config
    }

    async fn generate_embedding(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        let request = EmbeddingRequest::new(&self.config.embedding_model, text);
        let response = self.embedding_provider.embed(request).await?;

        Ok(response.into_vector())
    }

    fn store_executor(&self, tool: Arc<dyn Tool>) -> Result<(), DomainError> {
        let mut executors = self
            .executors
            .write()
            .map_err(|e| DomainError::internal(format!("Failed to acquire write lock: {}", e)))?;

        executors.insert(tool.name().to_string(), tool);

        Ok(())
    }

    fn executor(&self, name: &str) -> Result<Option<Arc<dyn Tool>>, DomainError> {
        let executors = self
            .executors
            .read()
            .map_err(|e| DomainError::internal(format!("Failed to acquire read lock: {}", e)))?;

        Ok(executors.get(name).cloned())
    }

    /// Register a concrete tool, computing its matching embedding
    ///
    /// Embedding failure leaves the descriptor dormant: the tool blocks its
    /// name and can be invoked by the agent loop, but similarity matching
    /// skips it. Duplicate names are rejected.
    pub async fn register_tool(&self, tool: Arc<dyn Tool>) -> Result<(), DomainError> {
        let mut descriptor = ToolDescriptor::new(tool.name(), tool.description());

        let embedding_text = format!("{}: {}", tool.name(), tool.description());
        match self.generate_embedding(&embedding_text).await {
            Ok(embedding) => {
                descriptor = descriptor.with_primary_embedding(embedding);
            }
            Err(e) => {
                warn!(
                    "Failed to embed tool '{}', registering dormant: {}",
                    tool.name(),
                    e
                );
            }
        }

        self.registry.register(descriptor).await?;
        self.store_executor(tool)?;

        Ok(())
    }

    /// Find the best tool for the prompt, honoring the exclusion set
    ///
    /// Embedding failure degrades to no candidate. Matches below the
    /// configured threshold are discarded.
    pub async fn select_tool(
        &self,
        prompt: &str,
        exclude: &[String],
    ) -> Result<Option<ToolMatch>, DomainError> {
        let embedding = match self.generate_embedding(prompt).await {
            Ok(embedding) => embedding,
            Err(e) => {
                warn!("Failed to embed prompt for tool selection: {}", e);
                return Ok(None);
            }
        };

        let Some(matched) = self.registry.best_match(&embedding, exclude).await? else {
            return Ok(None);
        };

        if matched.similarity < self.config.match_threshold {
            debug!(
                "Best tool '{}' at similarity {:.4} is below threshold {:.2}",
                matched.descriptor.name(),
                matched.similarity,
                self.config.match_threshold
            );
            return Ok(None);
        }

        debug!(
            "Selected tool '{}' at similarity {:.4}",
            matched.descriptor.name(),
            matched.similarity
        );

        Ok(Some(matched))
    }

    /// Ask the LLM to define a new tool for the prompt
    ///
    /// The definition must follow the strict two-line format; structural
    /// failures and duplicate names leave the registry unchanged. On success
    /// the tool is registered immediately and visible to later selections,
    /// but it is not executed in the current run.
    pub async fn synthesize_tool(
        &self,
        prompt: &str,
    ) -> Result<Option<ToolDescriptor>, DomainError> {
        let synthesis_prompt = format!(
            "A user asked: \"{}\"\n\
             No existing tool can handle this request. Define a new tool for it.\n\
             Respond with exactly two lines in this format:\n\
             Tool Name: a short snake_case identifier\n\
             Tool Description: one sentence describing what the tool does and its input",
            prompt
        );

        let output = match self.llm_provider.generate(&synthesis_prompt, &[]).await {
            Ok(output) => output,
            Err(e) => {
                warn!("Tool synthesis generation failed: {}", e);
                return Ok(None);
            }
        };

        let Some((name, description)) = parse_tool_definition(&output) else {
            warn!("Tool synthesis output did not follow the two-line format");
            return Ok(None);
        };

        if self.registry.contains(&name).await? {
            warn!("Tool synthesis produced duplicate name '{}', rejecting", name);
            return Ok(None);
        }

        let mut descriptor = ToolDescriptor::new(&name, &description);

        let embedding_text = format!("{}: {}", name, description);
        match self.generate_embedding(&embedding_text).await {
            Ok(embedding) => {
                descriptor = descriptor.with_primary_embedding(embedding);
            }
            Err(e) => {
                warn!(
                    "Failed to embed synthesized tool '{}', registering dormant: {}",
                    name, e
                );
            }
        }

        self.registry.register(descriptor.clone()).await?;
        self.store_executor(Arc::new(DynamicTool::new(&name, &description)))?;

        debug!("Synthesized and registered new tool '{}'", name);

        Ok(Some(descriptor))
    }

    /// Fold user feedback about a tool selection into the matching data
    ///
    /// An upvote appends the prompt's embedding as a reinforcement for the
    /// tool. A downvote mutates nothing here; the caller excludes the tool on
    /// its retry instead.
    pub async fn record_feedback(
        &self,
        prompt: &str,
        tool_name: &str,
        upvoted: bool,
    ) -> Result<(), DomainError> {
        if !upvoted {
            debug!("Downvote for tool '{}' recorded caller-side only", tool_name);
            return Ok(());
        }

        let embedding = match self.generate_embedding(prompt).await {
            Ok(embedding) => embedding,
            Err(e) => {
                warn!("Failed to embed prompt for reinforcement: {}", e);
                return Ok(());
            }
        };

        match self.registry.add_reinforcement(tool_name, embedding).await {
            Ok(added) => {
                debug!(
                    "Reinforcement for tool '{}': {}",
                    tool_name,
                    if added { "appended" } else { "already present" }
                );
                Ok(())
            }
            Err(DomainError::NotFound { .. }) => {
                warn!("Reinforcement target '{}' is not registered", tool_name);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn is_degenerate_input(&self, input: &str) -> bool {
        input.to_lowercase().contains("error") && input.len() > self.config.degenerate_input_len
    }

    async fn generate_tool_input(&self, prompt: &str, matched: &ToolMatch) -> Option<String> {
        let input_prompt = format!(
            "A user asked: \"{}\"\n\
             The tool '{}' will handle it. Tool description: {}\n\
             Respond with only the input string to pass to the tool, nothing else.",
            prompt,
            matched.descriptor.name(),
            matched.descriptor.description()
        );

        match self.llm_provider.generate(&input_prompt, &[]).await {
            Ok(input) => {
                let input = input.trim().trim_matches('"').to_string();
                if self.is_degenerate_input(&input) {
                    warn!(
                        "Generated input for tool '{}' looks degenerate, falling back",
                        matched.descriptor.name()
                    );
                    None
                } else {
                    Some(input)
                }
            }
            Err(e) => {
                warn!("Failed to generate tool input: {}", e);
                None
            }
        }
    }

    async fn direct_answer(&self, prompt: &str) -> (String, InvocationRecord) {
        match self.llm_provider.generate(prompt, &[]).await {
            Ok(answer) => {
                let answer = answer.trim().to_string();
                (
                    format!("Direct Answer: {}", answer),
                    InvocationRecord::DirectAnswer { answer },
                )
            }
            Err(e) => {
                warn!("Direct answer generation failed: {}", e);
                (
                    format!("Direct Answer: {}", FALLBACK_ANSWER),
                    InvocationRecord::DirectAnswer {
                        answer: FALLBACK_ANSWER.to_string(),
                    },
                )
            }
        }
    }

    /// Handle one prompt end to end
    ///
    /// Selection, synthesis, and direct answering are tried in that order;
    /// every collaborator failure degrades to the next branch, so this never
    /// returns an error. A tool synthesized during the run is registered but
    /// not executed until a later request selects it.
    pub async fn run(
        &self,
        prompt: &str,
        exclude: &[String],
    ) -> (String, Vec<InvocationRecord>) {
        let mut records = Vec::new();

        let matched = match self.select_tool(prompt, exclude).await {
            Ok(matched) => matched,
            Err(e) => {
                warn!("Tool selection failed: {}", e);
                None
            }
        };

        if let Some(matched) = matched {
            if let Some(input) = self.generate_tool_input(prompt, &matched).await {
                let name = matched.descriptor.name().to_string();

                match self.executor(&name) {
                    Ok(Some(tool)) => {
                        let observation = tool.invoke(&input).await;

                        let record = InvocationRecord::ToolInvocation {
                            tool_name: name.clone(),
                            tool_input: input,
                            observation: observation.clone(),
                            similarity: matched.similarity,
                        };
                        records.push(record);

                        let answer = format!(
                            "Used tool '{}' (similarity {:.2}): {}",
                            name, matched.similarity, observation
                        );
                        return (answer, records);
                    }
                    Ok(None) => {
                        warn!("Tool '{}' has no executor, falling back", name);
                    }
                    Err(e) => {
                        warn!("Executor lookup for '{}' failed: {}", name, e);
                    }
                }
            }

            let (answer, record) = self.direct_answer(prompt).await;
            records.push(record);
            return (answer, records);
        }

        match self.synthesize_tool(prompt).await {
            Ok(Some(descriptor)) => {
                let name = descriptor.name().to_string();
                records.push(InvocationRecord::ToolSynthesis {
                    tool_name: name.clone(),
                });

                let answer = format!(
                    "I did not have a tool for that, so I defined a new one: '{}'. \
                     Ask again and I will use it.",
                    name
                );
                (answer, records)
            }
            Ok(None) => {
                let (answer, record) = self.direct_answer(prompt).await;
                records.push(record);
                (answer, records)
            }
            Err(e) => {
                warn!("Tool synthesis failed: {}", e);
                let (answer, record) = self.direct_answer(prompt).await;
                records.push(record);
                (answer, records)
            }
        }
    }
}

/// Parse the strict two-line tool definition format
fn parse_tool_definition(output: &str) -> Option<(String, String)> {
    let name = TOOL_NAME_RE
        .captures(output)
        .map(|c| c[1].trim().to_string())?;
    let description = TOOL_DESCRIPTION_RE
        .captures(output)
        .map(|c| c[1].trim().to_string())?;

    if name.is_empty() || description.is_empty() {
        return None;
    }

    Some((name, description))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::embedding::MockEmbeddingProvider;
    use crate::domain::llm::MockLlmProvider;
    use crate::infrastructure::tools::{InMemoryToolRegistry, SpawnEntityTool};

    fn create_arbiter(
        embedding: MockEmbeddingProvider,
        llm: MockLlmProvider,
    ) -> ToolArbiterService {
        ToolArbiterService::new(
            Arc::new(InMemoryToolRegistry::new()),
            Arc::new(embedding),
            Arc::new(llm),
        )
    }

    #[test]
    fn test_parse_tool_definition() {
        let output = "Tool Name: weather_lookup\nTool Description: Looks up the weather.";
        let (name, description) = parse_tool_definition(output).unwrap();
        assert_eq!(name, "weather_lookup");
        assert_eq!(description, "Looks up the weather.");

        // Surrounding chatter is tolerated as long as both lines are present
        let chatty = "Sure, here you go:\nTool Name: npc_dialogue\nTool Description: Generates NPC dialogue.\nHope that helps!";
        assert!(parse_tool_definition(chatty).is_some());

        assert!(parse_tool_definition("no structure at all").is_none());
        assert!(parse_tool_definition("Tool Name: only_name").is_none());
        assert!(parse_tool_definition("Tool Description: only description").is_none());
    }

    #[tokio::test]
    async fn test_select_tool_requires_threshold() {
        let embedding = MockEmbeddingProvider::new("mock", 2)
            .with_fixture("spawn_entity: Spawns an entity in the game world. Input should be in the format 'entity_type,x,y,z' (e.g., 'goblin,10,0,5', 'health_potion,0,1,0').", vec![1.0, 0.0])
            .with_fixture("aligned prompt", vec![1.0, 0.0])
            .with_fixture("orthogonal prompt", vec![0.0, 1.0]);
        let arbiter = create_arbiter(embedding, MockLlmProvider::new("mock"));

        arbiter
            .register_tool(Arc::new(SpawnEntityTool))
            .await
            .unwrap();

        let matched = arbiter.select_tool("aligned prompt", &[]).await.unwrap();
        assert!(matched.is_some());
        assert!(matched.unwrap().similarity > 0.99);

        // Orthogonal prompt scores 0.0, below the 0.3 threshold
        let matched = arbiter.select_tool("orthogonal prompt", &[]).await.unwrap();
        assert!(matched.is_none());
    }

    #[tokio::test]
    async fn test_select_tool_honors_exclusion() {
        let embedding = MockEmbeddingProvider::new("mock", 2)
            .with_fixture("spawn_entity: Spawns an entity in the game world. Input should be in the format 'entity_type,x,y,z' (e.g., 'goblin,10,0,5', 'health_potion,0,1,0').", vec![1.0, 0.0])
            .with_fixture("aligned prompt", vec![1.0, 0.0]);
        let arbiter = create_arbiter(embedding, MockLlmProvider::new("mock"));

        arbiter
            .register_tool(Arc::new(SpawnEntityTool))
            .await
            .unwrap();

        // Excluded even though it matches perfectly
        let matched = arbiter
            .select_tool("aligned prompt", &["spawn_entity".to_string()])
            .await
            .unwrap();
        assert!(matched.is_none());
    }

    #[tokio::test]
    async fn test_select_tool_embedding_failure_degrades() {
        let arbiter = create_arbiter(
            MockEmbeddingProvider::new("mock", 2).with_error("API down"),
            MockLlmProvider::new("mock"),
        );

        let matched = arbiter.select_tool("prompt", &[]).await.unwrap();
        assert!(matched.is_none());
    }

    #[tokio::test]
    async fn test_synthesize_tool_registers_definition() {
        let registry = Arc::new(InMemoryToolRegistry::new());
        let llm = MockLlmProvider::new("mock")
            .with_response("Tool Name: weather_lookup\nTool Description: Looks up the weather for a location.");
        let arbiter = ToolArbiterService::new(
            registry.clone(),
            Arc::new(MockEmbeddingProvider::new("mock", 8)),
            Arc::new(llm),
        );

        let descriptor = arbiter.synthesize_tool("What's the weather in Berlin?").await.unwrap();

        let descriptor = descriptor.unwrap();
        assert_eq!(descriptor.name(), "weather_lookup");
        assert!(descriptor.primary_embedding().is_some());
        assert!(registry.contains("weather_lookup").await.unwrap());
    }

    #[tokio::test]
    async fn test_synthesize_duplicate_leaves_registry_unchanged() {
        let registry = Arc::new(InMemoryToolRegistry::new());
        let llm = MockLlmProvider::new("mock")
            .with_response("Tool Name: spawn_entity\nTool Description: Spawns things.");
        let arbiter = ToolArbiterService::new(
            registry.clone(),
            Arc::new(MockEmbeddingProvider::new("mock", 8)),
            Arc::new(llm),
        );

        arbiter
            .register_tool(Arc::new(SpawnEntityTool))
            .await
            .unwrap();
        let before = registry.get("spawn_entity").await.unwrap().unwrap();

        let result = arbiter.synthesize_tool("spawn something").await.unwrap();
        assert!(result.is_none());

        let after = registry.get("spawn_entity").await.unwrap().unwrap();
        assert_eq!(registry.len().await.unwrap(), 1);
        assert_eq!(
            before.reinforcement_embeddings().len(),
            after.reinforcement_embeddings().len()
        );
    }

    #[tokio::test]
    async fn test_synthesize_bad_format_rejected() {
        let registry = Arc::new(InMemoryToolRegistry::new());
        let llm = MockLlmProvider::new("mock").with_response("I cannot define a tool for that.");
        let arbiter = ToolArbiterService::new(
            registry.clone(),
            Arc::new(MockEmbeddingProvider::new("mock", 8)),
            Arc::new(llm),
        );

        let result = arbiter.synthesize_tool("prompt").await.unwrap();

        assert!(result.is_none());
        assert_eq!(registry.len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_synthesize_with_failed_embedding_registers_dormant() {
        let registry = Arc::new(InMemoryToolRegistry::new());
        let llm = MockLlmProvider::new("mock")
            .with_response("Tool Name: weather_lookup\nTool Description: Looks up the weather.");
        let arbiter = ToolArbiterService::new(
            registry.clone(),
            Arc::new(MockEmbeddingProvider::new("mock", 8).with_error("API down")),
            Arc::new(llm),
        );

        let descriptor = arbiter.synthesize_tool("weather?").await.unwrap().unwrap();

        assert!(descriptor.primary_embedding().is_none());
        // Dormant, but the name is taken
        assert!(registry.contains("weather_lookup").await.unwrap());
        let stored = registry.get("weather_lookup").await.unwrap().unwrap();
        assert!(!stored.has_embeddings());
    }

    #[tokio::test]
    async fn test_upvote_appends_reinforcement_and_widens_catchment() {
        let registry = Arc::new(InMemoryToolRegistry::new());
        let embedding = MockEmbeddingProvider::new("mock", 2)
            .with_fixture("spawn_entity: Spawns an entity in the game world. Input should be in the format 'entity_type,x,y,z' (e.g., 'goblin,10,0,5', 'health_potion,0,1,0').", vec![1.0, 0.0])
            .with_fixture("add a goblin to the scene", vec![0.6, 0.8])
            .with_fixture("put a goblin in the scene", vec![0.5, 0.866]);
        let arbiter = ToolArbiterService::new(
            registry.clone(),
            Arc::new(embedding),
            Arc::new(MockLlmProvider::new("mock")),
        );

        arbiter
            .register_tool(Arc::new(SpawnEntityTool))
            .await
            .unwrap();

        let query = "put a goblin in the scene";
        let before = registry
            .best_match(&[0.5, 0.866], &[])
            .await
            .unwrap()
            .unwrap()
            .similarity;

        arbiter
            .record_feedback("add a goblin to the scene", "spawn_entity", true)
            .await
            .unwrap();

        let after = registry
            .best_match(&[0.5, 0.866], &[])
            .await
            .unwrap()
            .unwrap()
            .similarity;

        // A paraphrase near the upvoted prompt now scores at least as well
        assert!(after >= before);

        let matched = arbiter.select_tool(query, &[]).await.unwrap();
        assert!(matched.is_some());
    }

    #[tokio::test]
    async fn test_downvote_mutates_nothing() {
        let registry = Arc::new(InMemoryToolRegistry::new());
        let arbiter = ToolArbiterService::new(
            registry.clone(),
            Arc::new(MockEmbeddingProvider::new("mock", 8)),
            Arc::new(MockLlmProvider::new("mock")),
        );

        arbiter
            .register_tool(Arc::new(SpawnEntityTool))
            .await
            .unwrap();

        arbiter
            .record_feedback("bad selection", "spawn_entity", false)
            .await
            .unwrap();

        let descriptor = registry.get("spawn_entity").await.unwrap().unwrap();
        assert!(descriptor.reinforcement_embeddings().is_empty());
    }

    #[tokio::test]
    async fn test_run_invokes_matched_tool() {
        let embedding = MockEmbeddingProvider::new("mock", 2)
            .with_fixture("spawn_entity: Spawns an entity in the game world. Input should be in the format 'entity_type,x,y,z' (e.g., 'goblin,10,0,5', 'health_potion,0,1,0').", vec![1.0, 0.0])
            .with_fixture("spawn a goblin at the gate", vec![0.9, 0.43589]);
        let llm = MockLlmProvider::new("mock").with_response("goblin,10,0,5");
        let arbiter = create_arbiter(embedding, llm);

        arbiter
            .register_tool(Arc::new(SpawnEntityTool))
            .await
            .unwrap();

        let (answer, records) = arbiter.run("spawn a goblin at the gate", &[]).await;

        assert_eq!(records.len(), 1);
        match &records[0] {
            InvocationRecord::ToolInvocation {
                tool_name,
                tool_input,
                observation,
                ..
            } => {
                assert_eq!(tool_name, "spawn_entity");
                assert_eq!(tool_input, "goblin,10,0,5");
                assert!(observation.contains("goblin"));
            }
            other => panic!("expected a tool invocation, got {:?}", other),
        }
        assert!(answer.contains("spawn_entity"));
    }

    #[tokio::test]
    async fn test_run_degenerate_input_falls_back_to_direct_answer() {
        let embedding = MockEmbeddingProvider::new("mock", 2)
            .with_fixture("spawn_entity: Spawns an entity in the game world. Input should be in the format 'entity_type,x,y,z' (e.g., 'goblin,10,0,5', 'health_potion,0,1,0').", vec![1.0, 0.0])
            .with_fixture("spawn something", vec![1.0, 0.0]);
        let degenerate = format!("error: {}", "x".repeat(120));
        let llm = MockLlmProvider::new("mock")
            .with_response(degenerate)
            .with_response("You could spawn a goblin manually.");
        let arbiter = create_arbiter(embedding, llm);

        arbiter
            .register_tool(Arc::new(SpawnEntityTool))
            .await
            .unwrap();

        let (answer, records) = arbiter.run("spawn something", &[]).await;

        assert_eq!(records.len(), 1);
        assert!(matches!(records[0], InvocationRecord::DirectAnswer { .. }));
        assert!(answer.starts_with("Direct Answer: "));
    }

    #[tokio::test]
    async fn test_run_synthesizes_without_executing() {
        let llm = MockLlmProvider::new("mock")
            .with_response("Tool Name: weather_lookup\nTool Description: Looks up the weather.");
        let registry = Arc::new(InMemoryToolRegistry::new());
        let arbiter = ToolArbiterService::new(
            registry.clone(),
            Arc::new(MockEmbeddingProvider::new("mock", 8)),
            Arc::new(llm),
        );

        let (answer, records) = arbiter.run("what's the weather?", &[]).await;

        // Defined but not invoked in this run
        assert_eq!(records.len(), 1);
        assert!(matches!(
            records[0],
            InvocationRecord::ToolSynthesis { .. }
        ));
        assert!(answer.contains("weather_lookup"));
        assert!(registry.contains("weather_lookup").await.unwrap());
    }

    #[tokio::test]
    async fn test_run_total_failure_yields_canned_fallback() {
        let arbiter = create_arbiter(
            MockEmbeddingProvider::new("mock", 8).with_error("API down"),
            MockLlmProvider::new("mock").with_error("LLM down"),
        );

        let (answer, records) = arbiter.run("prompt", &[]).await;

        assert_eq!(records.len(), 1);
        match &records[0] {
            InvocationRecord::DirectAnswer { answer: recorded } => {
                assert_eq!(recorded, FALLBACK_ANSWER);
            }
            other => panic!("expected a direct answer, got {:?}", other),
        }
        assert!(answer.contains(FALLBACK_ANSWER));
    }
}
