//! CLI module for the semantic agent
//!
//! Provides subcommands for the two drivers:
//! - `chat`: interactive loop over the plan cache and tool arbiter
//! - `demo`: scripted non-interactive walkthrough of the agent loop

pub mod chat;
pub mod demo;

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::domain::embedding::EmbeddingProvider;
use crate::domain::llm::LlmProvider;
use crate::infrastructure::embedding::OpenAiEmbeddingProvider;
use crate::infrastructure::llm::{HttpClient, OpenAiLlmProvider};

/// Semantic agent - plan cache and adaptive tool arbitration
#[derive(Parser)]
#[command(name = "semantic-agent")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Interactive chat driven by the plan cache and tool arbiter
    Chat,

    /// Scripted walkthrough of the agent loop and plan cache
    Demo,
}

/// Build the OpenAI-backed providers from configuration
pub(crate) fn build_providers(
    config: &AppConfig,
) -> anyhow::Result<(Arc<dyn EmbeddingProvider>, Arc<dyn LlmProvider>)> {
    let api_key = config.provider.resolve_api_key().ok_or_else(|| {
        anyhow::anyhow!("No API key configured. Set OPENAI_API_KEY or provider.api_key.")
    })?;

    let client = HttpClient::with_timeout(Duration::from_secs(config.provider.timeout_secs))?;

    let embedding: Arc<dyn EmbeddingProvider> = match &config.provider.base_url {
        Some(base_url) => Arc::new(OpenAiEmbeddingProvider::with_base_url(
            client.clone(),
            api_key.as_str(),
            base_url.as_str(),
        )),
        None => Arc::new(OpenAiEmbeddingProvider::new(client.clone(), api_key.as_str())),
    };

    let mut llm_provider = match &config.provider.base_url {
        Some(base_url) => {
            OpenAiLlmProvider::with_base_url(client, api_key.as_str(), base_url.as_str())
        }
        None => OpenAiLlmProvider::new(client, api_key.as_str()),
    };
    if let Some(model) = &config.provider.llm_model {
        llm_provider = llm_provider.with_model(model);
    }

    Ok((embedding, Arc::new(llm_provider)))
}
