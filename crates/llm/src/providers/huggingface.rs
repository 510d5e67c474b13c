//! Hugging Face Inference API provider.
//!
//! Text-generation endpoint:
//! `POST https://api-inference.huggingface.co/models/<model>` with a bearer
//! token and `{inputs, parameters, options}`; success is
//! `[{"generated_text": "..."}]`.

use crate::client::{GenerationParams, LlmClient, LlmRequest, LlmResponse};
use crate::error::LlmError;
use ragnarok_core::ApiToken;
use serde::Serialize;
use std::time::Duration;

/// Base URL for hosted text-generation models.
pub const DEFAULT_HF_API_BASE: &str = "https://api-inference.huggingface.co/models";

/// Hugging Face request body.
#[derive(Debug, Serialize)]
struct HfRequest<'a> {
    inputs: &'a str,
    parameters: HfParameters,
    options: HfOptions,
}

#[derive(Debug, Serialize)]
struct HfParameters {
    max_new_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    do_sample: bool,
    return_full_text: bool,
}

#[derive(Debug, Serialize)]
struct HfOptions {
    use_cache: bool,
    wait_for_model: bool,
}

impl From<&GenerationParams> for HfParameters {
    fn from(p: &GenerationParams) -> Self {
        Self {
            max_new_tokens: p.max_new_tokens,
            temperature: p.temperature,
            top_p: p.top_p,
            do_sample: p.do_sample,
            return_full_text: p.return_full_text,
        }
    }
}

/// Hugging Face text-generation client.
#[derive(Debug)]
pub struct HuggingFaceClient {
    endpoint: String,
    model: String,
    token: ApiToken,
    client: reqwest::Client,
}

impl HuggingFaceClient {
    /// Client for a hosted model on the public Inference API.
    pub fn new(model: impl Into<String>, token: ApiToken) -> Self {
        let model = model.into();
        let endpoint = format!("{}/{}", DEFAULT_HF_API_BASE, model);
        Self::with_endpoint(endpoint, model, token)
    }

    /// Client for a dedicated endpoint (or a local stub in tests).
    pub fn with_endpoint(endpoint: impl Into<String>, model: impl Into<String>, token: ApiToken) -> Self {
        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            token,
            client: reqwest::Client::new(),
        }
    }

    /// Replace the transport default with an explicit request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, LlmError> {
        self.client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(self)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn to_hf_request<'a>(&self, request: &'a LlmRequest) -> HfRequest<'a> {
        HfRequest {
            inputs: &request.prompt,
            parameters: HfParameters::from(&request.params),
            options: HfOptions {
                use_cache: request.params.use_cache,
                wait_for_model: request.params.wait_for_model,
            },
        }
    }
}

/// Extract `generated_text` from a successful response body.
pub(crate) fn parse_generation_response(body: &str) -> Result<String, LlmError> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| LlmError::Decode {
        message: e.to_string(),
        body: body.to_string(),
    })?;

    value
        .as_array()
        .and_then(|items| items.first())
        .and_then(|first| first.get("generated_text"))
        .and_then(|text| text.as_str())
        .map(str::to_string)
        .ok_or_else(|| LlmError::UnexpectedResponse(body.to_string()))
}

#[async_trait::async_trait]
impl LlmClient for HuggingFaceClient {
    fn provider_name(&self) -> &str {
        "huggingface"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    #[tracing::instrument(skip(self, request), fields(provider = "huggingface", model = %self.model))]
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        tracing::debug!(
            prompt_chars = request.prompt.len(),
            max_new_tokens = request.params.max_new_tokens,
            "Sending generation request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.token.expose())
            .json(&self.to_hf_request(request))
            .send()
            .await
            .map_err(|e| LlmError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::Transport(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            tracing::warn!("Hugging Face API returned {}", status);
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let content = parse_generation_response(&body)?;
        tracing::debug!(chars = content.len(), "Received generation");

        Ok(LlmResponse {
            content,
            model: self.model.clone(),
        })
    }
}
