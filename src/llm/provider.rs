use async_trait::async_trait;
use thiserror::Error;

use super::types::ChatRequest;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Environment variable {env} is not set")]
    MissingApiKey { env: String },

    #[error("Request to {url} failed: {source}")]
    RequestError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("LLM endpoint returned {status}: {body}")]
    ApiError {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Malformed response from LLM endpoint: {0}")]
    MalformedResponse(String),
}

#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// return the provider name (e.g. "groq", "openai")
    fn name(&self) -> &str;

    /// chat completion (non-streaming)
    async fn chat(&self, request: ChatRequest) -> Result<String, LlmError>;
}
