//! Interactive chat driver
//!
//! Thin loop over the services: cache lookup first, arbiter on a miss, y/n
//! feedback folded into plan rewards and tool reinforcement. A downvoted tool
//! goes into the per-request exclusion set before the retry.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use tracing::info;

use crate::config::AppConfig;
use crate::domain::tool::InvocationRecord;
use crate::infrastructure::observability;
use crate::infrastructure::plan_cache::InMemoryVectorIndex;
use crate::infrastructure::services::{PlanCacheService, ToolArbiterService};
use crate::infrastructure::tools::{builtin_tools, InMemoryToolRegistry};

/// Run the interactive chat loop
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    observability::init_logging(&config.logging);

    let (embedding_provider, llm_provider) = super::build_providers(&config)?;

    let cache = PlanCacheService::with_config(
        Arc::new(InMemoryVectorIndex::new()),
        embedding_provider.clone(),
        config.plan_cache.clone(),
    );

    let arbiter = ToolArbiterService::with_config(
        Arc::new(InMemoryToolRegistry::new()),
        embedding_provider,
        llm_provider,
        config.arbiter.clone(),
    );

    for tool in builtin_tools() {
        arbiter.register_tool(tool).await?;
    }

    info!("Chat session ready");
    println!("Semantic agent chat. Type your request, or 'quit' to end.");

    let stdin = io::stdin();

    loop {
        print!("\nYour request: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let prompt = line.trim();
        if prompt.is_empty() {
            continue;
        }
        if matches!(prompt, "quit" | "exit") {
            break;
        }

        handle_prompt(&cache, &arbiter, prompt).await?;
    }

    println!("Goodbye.");

    Ok(())
}

async fn handle_prompt(
    cache: &PlanCacheService,
    arbiter: &ToolArbiterService,
    prompt: &str,
) -> anyhow::Result<()> {
    if let Some(hit) = cache.lookup(prompt).await? {
        println!(
            ">>> Cache HIT (similarity {:.2}, stored for: '{}')",
            hit.similarity, hit.prompt_raw
        );
        for (i, action) in hit.actions.iter().enumerate() {
            println!("  {}. {}", i + 1, action);
        }

        let success = read_feedback()?;
        cache.update_reward(hit.id, success).await?;
        return Ok(());
    }

    println!(">>> Cache MISS, consulting the arbiter...");

    let mut exclude: Vec<String> = Vec::new();

    loop {
        let (answer, records) = arbiter.run(prompt, &exclude).await;

        println!("{}", answer);

        // A synthesis-only run must not be cached: the stored acknowledgement
        // would hit on the follow-up prompt and the new tool would never run
        let stored = if is_cacheable(&records) {
            let actions: Vec<String> =
                records.iter().map(InvocationRecord::to_action_string).collect();
            cache.store(prompt, actions).await?
        } else {
            None
        };

        let success = read_feedback()?;

        if let Some(id) = stored {
            cache.update_reward(id, success).await?;
        }

        let invoked_tool = records
            .iter()
            .rev()
            .find(|r| r.is_invocation())
            .and_then(|r| r.tool_name())
            .map(str::to_string);

        if let Some(tool_name) = &invoked_tool {
            arbiter.record_feedback(prompt, tool_name, success).await?;
        }

        if success {
            break;
        }

        match invoked_tool {
            Some(tool_name) if !exclude.contains(&tool_name) => {
                println!("Retrying without tool '{}'...", tool_name);
                exclude.push(tool_name);
            }
            _ => break,
        }
    }

    Ok(())
}

/// Whether a run's history represents a reusable plan
fn is_cacheable(records: &[InvocationRecord]) -> bool {
    records
        .iter()
        .any(|r| !matches!(r, InvocationRecord::ToolSynthesis { .. }))
}

fn read_feedback() -> anyhow::Result<bool> {
    let stdin = io::stdin();

    loop {
        print!("Did this work? (y/n): ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(false);
        }

        match line.trim().to_lowercase().as_str() {
            "y" => return Ok(true),
            "n" => return Ok(false),
            _ => println!("Invalid input. Please enter 'y' or 'n'."),
        }
    }
}
