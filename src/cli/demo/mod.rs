//! Scripted demo driver
//!
//! Non-interactive walkthrough: runs the think/act agent loop over the
//! builtin game tools for a fixed prompt list, stores the resulting plans,
//! and finishes with a paraphrase lookup to show a semantic cache hit.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::domain::tool::InvocationRecord;
use crate::infrastructure::observability;
use crate::infrastructure::plan_cache::InMemoryVectorIndex;
use crate::infrastructure::services::{AgentRunner, PlanCacheService};
use crate::infrastructure::tools::builtin_tools;

const DEMO_PROMPTS: &[&str] = &[
    "Make the skybox stormy",
    "Spawn a friendly dog",
    "Set player health to 50",
    "Play a happy sound effect",
];

const PARAPHRASE_PROMPT: &str = "Turn the sky dark and stormy";

/// Run the scripted walkthrough
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    observability::init_logging(&config.logging);

    let (embedding_provider, llm_provider) = super::build_providers(&config)?;

    let cache = PlanCacheService::with_config(
        Arc::new(InMemoryVectorIndex::new()),
        embedding_provider,
        config.plan_cache.clone(),
    );

    let runner = AgentRunner::new(llm_provider, builtin_tools());

    println!("--- Semantic agent demo ---");

    for prompt in DEMO_PROMPTS {
        println!("\nPrompt: {}", prompt);

        if let Some(hit) = cache.lookup(prompt).await? {
            println!(">>> Cache HIT (similarity {:.2})", hit.similarity);
            for (i, action) in hit.actions.iter().enumerate() {
                println!("  {}. {}", i + 1, action);
            }
            cache.update_reward(hit.id, true).await?;
            continue;
        }

        println!(">>> Cache MISS, running the agent...");
        let (answer, history) = runner.run(prompt).await;
        println!("Final answer: {}", answer);

        if answer.starts_with("Error:") {
            println!("Agent failed; not storing a plan.");
            continue;
        }

        let actions: Vec<String> = if history.is_empty() {
            vec![format!("Direct Answer: {}", answer)]
        } else {
            history.iter().map(InvocationRecord::to_action_string).collect()
        };

        for (i, action) in actions.iter().enumerate() {
            println!("  {}. {}", i + 1, action);
        }

        if let Some(id) = cache.store(prompt, actions).await? {
            println!("Stored plan {}", id);
            cache.update_reward(id, true).await?;
        }
    }

    println!("\nParaphrase lookup: {}", PARAPHRASE_PROMPT);
    match cache.lookup(PARAPHRASE_PROMPT).await? {
        Some(hit) => {
            println!(
                ">>> Cache HIT (similarity {:.2}, stored for: '{}')",
                hit.similarity, hit.prompt_raw
            );
            for (i, action) in hit.actions.iter().enumerate() {
                println!("  {}. {}", i + 1, action);
            }
        }
        None => println!(">>> Cache MISS."),
    }

    println!("\n--- Demo complete ---");

    Ok(())
}
