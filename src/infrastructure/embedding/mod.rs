//! Embedding provider infrastructure

mod openai;

pub use openai::OpenAiEmbeddingProvider;
