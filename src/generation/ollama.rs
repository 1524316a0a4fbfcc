//! Ollama API generation client
//!
//! Non-streaming completion via POST /api/generate, plus the health and
//! model-listing endpoints the application shell uses at startup.

use crate::errors::{AssistantError, Result};
use crate::generation::Generator;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Ollama API endpoint
pub const DEFAULT_OLLAMA_URL: &str = "http://127.0.0.1:11434";

/// Default model
pub const DEFAULT_MODEL: &str = "qwen2.5:7b-instruct";

/// Per-call generation timeout
const GENERATE_TIMEOUT: Duration = Duration::from_secs(120);

/// HTTP client timeout (connection level)
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Debug, Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Debug, Deserialize)]
struct ModelsResponse {
    models: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    name: String,
}

/// Ollama generation client
#[derive(Debug, Clone)]
pub struct OllamaGenerator {
    client: Client,
    base_url: String,
    model: String,
    call_timeout: Duration,
}

impl OllamaGenerator {
    /// Create a client with default endpoint and model
    pub fn new() -> Result<Self> {
        Self::with_config(DEFAULT_OLLAMA_URL, DEFAULT_MODEL)
    }

    /// Create a client with custom endpoint and model
    pub fn with_config(base_url: &str, model: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(AssistantError::HttpError)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            call_timeout: GENERATE_TIMEOUT,
        })
    }

    /// Override the per-call timeout
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// Check if Ollama is reachable
    pub async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/api/version", self.base_url);

        match self.client.get(&url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    /// List installed model names
    pub async fn list_models(&self) -> Result<Vec<String>> {
        let url = format!("{}/api/tags", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AssistantError::OllamaApiError(format!("Failed to list models: {}", e)))?;

        if !response.status().is_success() {
            return Err(AssistantError::OllamaApiError(
                "Failed to retrieve model list".to_string(),
            ));
        }

        let models_response: ModelsResponse = response
            .json()
            .await
            .map_err(|e| AssistantError::OllamaApiError(format!("Failed to parse models: {}", e)))?;

        Ok(models_response.models.into_iter().map(|m| m.name).collect())
    }

    /// Base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn generate_inner(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.base_url);

        let request = GenerateRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AssistantError::GenerationFailed {
                reason: format!("request failed: {}", e),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AssistantError::GenerationFailed {
                reason: format!("HTTP {}: {}", status, error_text),
            });
        }

        let body: GenerateResponse =
            response
                .json()
                .await
                .map_err(|e| AssistantError::GenerationFailed {
                    reason: format!("malformed response: {}", e),
                })?;

        Ok(body.response)
    }
}

#[async_trait]
impl Generator for OllamaGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        match tokio::time::timeout(self.call_timeout, self.generate_inner(prompt)).await {
            Ok(result) => result,
            Err(_) => Err(AssistantError::GenerationFailed {
                reason: "timeout".to_string(),
            }),
        }
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = OllamaGenerator::new();
        assert!(client.is_ok());
        assert_eq!(client.unwrap().model_name(), DEFAULT_MODEL);
    }

    #[test]
    fn test_with_config_trims_trailing_slash() {
        let client = OllamaGenerator::with_config("http://localhost:11434/", "llama3.1:8b").unwrap();
        assert_eq!(client.base_url(), "http://localhost:11434");
        assert_eq!(client.model_name(), "llama3.1:8b");
    }

    #[tokio::test]
    async fn test_health_check_unreachable_is_false_not_error() {
        // Port 1 is never an Ollama endpoint
        let client = OllamaGenerator::with_config("http://127.0.0.1:1", "m").unwrap();
        let healthy = client.health_check().await.unwrap();
        assert!(!healthy);
    }
}
