//! Hosted OpenAI-compatible chat completions client

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use super::provider::{LlmError, LlmProvider};
use super::types::ChatRequest;
use crate::config::LlmConfig;

/// Client for a hosted OpenAI-compatible chat completions endpoint
#[derive(Clone)]
pub struct HostedProvider {
    name: String,
    base_url: String,
    model: String,
    api_key: String,
    client: Client,
}

impl HostedProvider {
    /// Create a provider from configuration
    ///
    /// The API key is read from the environment variable named in the
    /// configuration; a missing or empty key fails here rather than on the
    /// first request.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| LlmError::MissingApiKey {
                env: config.api_key_env.clone(),
            })?;

        Ok(Self {
            name: config.provider.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            client: Client::new(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LlmProvider for HostedProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn chat(&self, request: ChatRequest) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);

        let body = json!({
            "model": self.model,
            "messages": request.messages,
            "temperature": request.temperature,
            "top_p": request.top_p,
            "max_tokens": request.max_tokens,
            "stream": false,
        });

        tracing::debug!("Requesting chat completion from {}", url);

        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::RequestError {
                url: url.clone(),
                source: e,
            })?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(LlmError::ApiError { status, body });
        }

        let payload: Value = res.json().await.map_err(|e| LlmError::RequestError {
            url: url.clone(),
            source: e,
        })?;

        let content = payload["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                LlmError::MalformedResponse("Missing choices[0].message.content".to_string())
            })?;

        Ok(content.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key() {
        let config = LlmConfig {
            provider: "groq".to_string(),
            base_url: "https://api.groq.com/openai/v1".to_string(),
            model: "llama-3.3-70b-versatile".to_string(),
            api_key_env: "DOCENT_TEST_UNSET_KEY".to_string(),
        };

        std::env::remove_var("DOCENT_TEST_UNSET_KEY");
        let result = HostedProvider::from_config(&config);
        assert!(matches!(result, Err(LlmError::MissingApiKey { .. })));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = LlmConfig {
            provider: "groq".to_string(),
            base_url: "https://api.groq.com/openai/v1/".to_string(),
            model: "llama-3.3-70b-versatile".to_string(),
            api_key_env: "DOCENT_TEST_SET_KEY".to_string(),
        };

        std::env::set_var("DOCENT_TEST_SET_KEY", "test-key");
        let provider = HostedProvider::from_config(&config).unwrap();
        assert_eq!(provider.base_url, "https://api.groq.com/openai/v1");
    }
}
