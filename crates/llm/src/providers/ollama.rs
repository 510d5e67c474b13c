//! Ollama LLM provider implementation.
//!
//! Local alternative to the hosted Hugging Face model.
//! Ollama API: https://github.com/ollama/ollama/blob/main/docs/api.md

use crate::client::{LlmClient, LlmRequest, LlmResponse};
use crate::error::LlmError;
use serde::{Deserialize, Serialize};

/// Default local Ollama endpoint.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Ollama API request format.
#[derive(Debug, Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    num_predict: u32,
}

/// Ollama API response format.
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    model: String,
    response: String,
}

/// Ollama LLM client.
#[derive(Debug)]
pub struct OllamaClient {
    /// Base URL for Ollama API
    base_url: String,

    /// Model to generate with
    model: String,

    /// HTTP client
    client: reqwest::Client,
}

impl OllamaClient {
    /// Create a new Ollama client against the default local URL.
    pub fn new(model: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_OLLAMA_URL, model)
    }

    /// Create a new Ollama client with a custom base URL.
    pub fn with_base_url(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Convert LlmRequest to Ollama format.
    fn to_ollama_request<'a>(&'a self, request: &'a LlmRequest) -> OllamaRequest<'a> {
        // Greedy decoding is expressed through temperature in Ollama.
        let temperature = if request.params.do_sample {
            request.params.temperature
        } else {
            0.0
        };

        OllamaRequest {
            model: &self.model,
            prompt: &request.prompt,
            stream: false,
            options: OllamaOptions {
                temperature,
                top_p: request.params.top_p,
                num_predict: request.params.max_new_tokens,
            },
        }
    }
}

#[async_trait::async_trait]
impl LlmClient for OllamaClient {
    fn provider_name(&self) -> &str {
        "ollama"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    #[tracing::instrument(skip(self, request), fields(provider = "ollama", model = %self.model))]
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        tracing::debug!(prompt_chars = request.prompt.len(), "Sending completion request to Ollama");

        let url = format!("{}/api/generate", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&self.to_ollama_request(request))
            .send()
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::Transport(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: OllamaResponse = serde_json::from_str(&body).map_err(|e| LlmError::Decode {
            message: e.to_string(),
            body: body.clone(),
        })?;

        tracing::debug!(chars = parsed.response.len(), "Received completion from Ollama");

        Ok(LlmResponse {
            content: parsed.response,
            model: parsed.model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ollama_client_creation() {
        let client = OllamaClient::new("mistral");
        assert_eq!(client.provider_name(), "ollama");
        assert_eq!(client.model_name(), "mistral");
        assert_eq!(client.base_url, "http://localhost:11434");
    }

    #[test]
    fn test_ollama_request_conversion() {
        let client = OllamaClient::with_base_url("http://localhost:8080/", "mistral");
        let request = LlmRequest::new("Hello")
            .with_temperature(0.7)
            .with_top_p(0.9)
            .with_max_tokens(500);

        let json = serde_json::to_value(client.to_ollama_request(&request)).unwrap();
        assert_eq!(client.base_url, "http://localhost:8080");
        assert_eq!(json["model"], "mistral");
        assert_eq!(json["prompt"], "Hello");
        assert_eq!(json["stream"], false);
        assert_eq!(json["options"]["num_predict"], 500);
    }

    #[test]
    fn test_greedy_request_zeroes_temperature() {
        let client = OllamaClient::new("mistral");
        let request = LlmRequest::new("q").with_temperature(0.1).with_sampling(false);
        let json = serde_json::to_value(client.to_ollama_request(&request)).unwrap();
        assert_eq!(json["options"]["temperature"], 0.0);
        assert!(json["options"].get("top_p").is_none());
    }
}
