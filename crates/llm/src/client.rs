//! LLM client abstraction and request/response types.
//!
//! This is the narrow seam between the answer pipeline and whatever remote
//! model produces text: `complete(prompt + params) -> text | LlmError`.

use crate::error::LlmError;
use serde::{Deserialize, Serialize};

/// Decoding parameters for one generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Maximum number of tokens to generate
    pub max_new_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,

    /// Nucleus sampling cutoff
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,

    /// Sample instead of greedy decoding
    pub do_sample: bool,

    /// Echo the prompt in the output
    pub return_full_text: bool,

    /// Allow the provider to serve a cached completion
    pub use_cache: bool,

    /// Block until a cold model is loaded instead of failing fast
    pub wait_for_model: bool,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_new_tokens: 256,
            temperature: 0.7,
            top_p: None,
            do_sample: true,
            return_full_text: false,
            use_cache: false,
            wait_for_model: true,
        }
    }
}

/// LLM completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmRequest {
    /// The prompt text to send to the LLM
    pub prompt: String,

    /// Decoding parameters
    pub params: GenerationParams,
}

impl LlmRequest {
    /// Create a new request with default decoding parameters.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            params: GenerationParams::default(),
        }
    }

    /// Set the maximum tokens to generate.
    pub fn with_max_tokens(mut self, max_new_tokens: u32) -> Self {
        self.params.max_new_tokens = max_new_tokens;
        self
    }

    /// Set the temperature for sampling.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.params.temperature = temperature;
        self
    }

    /// Set the nucleus sampling cutoff.
    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.params.top_p = Some(top_p);
        self
    }

    /// Toggle sampling; `false` requests greedy decoding.
    pub fn with_sampling(mut self, do_sample: bool) -> Self {
        self.params.do_sample = do_sample;
        self
    }
}

/// LLM completion response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    /// The generated text
    pub content: String,

    /// Model that generated the response
    pub model: String,
}

/// Trait for generation providers.
///
/// Implementations must not put credentials into error messages.
#[async_trait::async_trait]
pub trait LlmClient: Send + Sync {
    /// Get the provider name (e.g., "huggingface", "ollama").
    fn provider_name(&self) -> &str;

    /// Get the model identifier.
    fn model_name(&self) -> &str;

    /// Perform a non-streaming completion.
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = LlmRequest::new("Rewrite this")
            .with_max_tokens(100)
            .with_temperature(0.1)
            .with_sampling(false);

        assert_eq!(request.prompt, "Rewrite this");
        assert_eq!(request.params.max_new_tokens, 100);
        assert_eq!(request.params.temperature, 0.1);
        assert!(!request.params.do_sample);
        assert_eq!(request.params.top_p, None);
        assert!(!request.params.return_full_text);
    }

    #[test]
    fn test_top_p_serialization_is_optional() {
        let params = GenerationParams::default();
        let json = serde_json::to_value(&params).unwrap();
        assert!(json.get("top_p").is_none());

        let request = LlmRequest::new("x").with_top_p(0.9);
        let json = serde_json::to_value(&request.params).unwrap();
        assert!((json["top_p"].as_f64().unwrap() - 0.9).abs() < 1e-6);
    }
}
