//! LLM provider infrastructure

mod http_client;
mod openai;

pub use http_client::{HttpClient, HttpClientTrait};
pub use openai::OpenAiLlmProvider;

#[cfg(test)]
pub use http_client::mock::MockHttpClient;
